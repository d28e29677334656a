// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Keys of the secondary index column family.
//!
//! Every key starts with the 8-byte id of the index it belongs to, followed by
//! the hashed equality values in declaration order, the indexed value for
//! interval and range indexes, and finally the record id. All components are
//! fixed width except the prefix index lexeme, which is escaped and
//! terminated.

pub use hash::HashIndexKey;
pub use interval::IntervalIndexKey;
pub use prefix::PrefixIndexKey;
pub use range::RangeIndexKey;

use crate::{EncodedKey, encoding::keycode::KeySerializer, interface::catalog::IndexId};

mod hash;
mod interval;
mod prefix;
mod range;

const U64_LEN: usize = 8;

/// The half-open key range `[index, index + 1)` holding every entry of one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexKeyRange {
	pub start: EncodedKey,
	pub end: EncodedKey,
}

impl IndexKeyRange {
	pub fn of(index: IndexId) -> Self {
		let start = EncodedKey::new(index.0.to_be_bytes().to_vec());
		let end = match index.0.checked_add(1) {
			Some(next) => EncodedKey::new(next.to_be_bytes().to_vec()),
			None => EncodedKey::new(vec![0xff; U64_LEN + 1]),
		};
		Self {
			start,
			end,
		}
	}
}

/// `index ‖ hashes…`, the prefix of one equality group.
pub(crate) fn group_prefix(index: IndexId, hashes: &[u64]) -> KeySerializer {
	let mut serializer = KeySerializer::with_capacity(U64_LEN * (hashes.len() + 3));
	serializer.extend_u64(index);
	for hash in hashes {
		serializer.extend_u64(*hash);
	}
	serializer
}

/// Splits a fixed-width key `index ‖ u64… ‖ id` into its 8-byte components.
pub(crate) fn split_u64s(key: &[u8]) -> Option<Vec<u64>> {
	if key.is_empty() || key.len() % U64_LEN != 0 {
		return None;
	}
	Some(key
		.chunks_exact(U64_LEN)
		.map(|chunk| {
			let mut buf = [0u8; U64_LEN];
			buf.copy_from_slice(chunk);
			u64::from_be_bytes(buf)
		})
		.collect())
}
