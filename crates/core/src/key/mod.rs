// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{borrow::Borrow, fmt, ops::Deref};

pub use index::{HashIndexKey, IndexKeyRange, IntervalIndexKey, PrefixIndexKey, RangeIndexKey};
pub use pattern::{KeyMatch, KeyPattern};
pub use record::RecordKey;

mod index;
mod pattern;
mod record;

#[derive(Clone, PartialOrd, Ord, Hash, PartialEq, Eq, Default)]
pub struct EncodedKey(pub Vec<u8>);

impl EncodedKey {
	pub fn new(key: impl Into<Vec<u8>>) -> Self {
		Self(key.into())
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}
}

impl Deref for EncodedKey {
	type Target = Vec<u8>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Borrow<[u8]> for EncodedKey {
	fn borrow(&self) -> &[u8] {
		&self.0
	}
}

impl AsRef<[u8]> for EncodedKey {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl fmt::Debug for EncodedKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "EncodedKey(")?;
		for b in &self.0 {
			write!(f, "{b:02x}")?;
		}
		write!(f, ")")
	}
}

pub trait EncodableKey {
	fn encode(&self) -> EncodedKey;

	fn decode(key: &[u8]) -> Option<Self>
	where
		Self: Sized;
}

/// The last eight bytes of a key, read as a big-endian `u64`.
pub(crate) fn trailing_u64(key: &[u8]) -> Option<u64> {
	let start = key.len().checked_sub(8)?;
	let mut buf = [0u8; 8];
	buf.copy_from_slice(&key[start..]);
	Some(u64::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
	use super::{EncodedKey, trailing_u64};

	#[test]
	fn test_debug_hex() {
		assert_eq!(format!("{:?}", EncodedKey::new(vec![0x01, 0xab])), "EncodedKey(01ab)");
	}

	#[test]
	fn test_trailing_u64() {
		assert_eq!(trailing_u64(&[9, 0, 0, 0, 0, 0, 0, 0, 42]), Some(42));
		assert_eq!(trailing_u64(&[1, 2]), None);
	}
}
