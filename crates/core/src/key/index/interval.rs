// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{U64_LEN, group_prefix, split_u64s};
use crate::{
	EncodableKey, EncodedKey,
	interface::catalog::{IndexId, RecordId},
};

/// `index ‖ h(hashed…) ‖ ordered(value) ‖ id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalIndexKey {
	pub index: IndexId,
	pub hashes: Vec<u64>,
	pub value: u64,
	pub id: RecordId,
}

impl IntervalIndexKey {
	pub fn prefix(index: IndexId, hashes: &[u64]) -> EncodedKey {
		group_prefix(index, hashes).to_encoded_key()
	}

	/// Sorts before every entry of the group whose value is at least `value`.
	pub fn left_border(index: IndexId, hashes: &[u64], value: u64) -> EncodedKey {
		let mut serializer = group_prefix(index, hashes);
		serializer.extend_u64(value);
		serializer.to_encoded_key()
	}

	/// Sorts after every entry of the group whose value is at most `value`.
	pub fn right_border(index: IndexId, hashes: &[u64], value: u64) -> EncodedKey {
		let mut serializer = group_prefix(index, hashes);
		serializer.extend_u64(value).extend_u64(u64::MAX);
		serializer.to_encoded_key()
	}

	/// The indexed value, read directly in front of the trailing id.
	pub fn value_of(key: &[u8]) -> Option<u64> {
		let end = key.len().checked_sub(U64_LEN)?;
		let start = end.checked_sub(U64_LEN)?;
		let mut buf = [0u8; U64_LEN];
		buf.copy_from_slice(&key[start..end]);
		Some(u64::from_be_bytes(buf))
	}

	pub fn id_of(key: &[u8]) -> Option<RecordId> {
		crate::key::trailing_u64(key).map(RecordId)
	}
}

impl EncodableKey for IntervalIndexKey {
	fn encode(&self) -> EncodedKey {
		let mut serializer = group_prefix(self.index, &self.hashes);
		serializer.extend_u64(self.value).extend_u64(self.id);
		serializer.to_encoded_key()
	}

	fn decode(key: &[u8]) -> Option<Self> {
		if key.len() < 3 * U64_LEN {
			return None;
		}
		let mut parts = split_u64s(key)?;
		let id = RecordId(parts.pop()?);
		let value = parts.pop()?;
		let index = IndexId(parts.remove(0));
		Some(Self {
			index,
			hashes: parts,
			value,
			id,
		})
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::ordered;

	use super::IntervalIndexKey;
	use crate::{
		EncodableKey,
		interface::catalog::{IndexId, RecordId},
	};

	fn key(value: i64, id: u64) -> IntervalIndexKey {
		IntervalIndexKey {
			index: IndexId(4),
			hashes: vec![1],
			value: ordered::from_i64(value),
			id: RecordId(id),
		}
	}

	#[test]
	fn test_encode_decode() {
		let k = key(-3, 8);
		let encoded = k.encode();
		assert_eq!(IntervalIndexKey::decode(&encoded).unwrap(), k);
		assert_eq!(IntervalIndexKey::value_of(&encoded), Some(ordered::from_i64(-3)));
		assert_eq!(IntervalIndexKey::id_of(&encoded), Some(RecordId(8)));
	}

	#[test]
	fn test_value_order() {
		assert!(key(-10, 9).encode() < key(-9, 1).encode());
		assert!(key(5, 1).encode() < key(5, 2).encode());
	}

	#[test]
	fn test_borders() {
		let left = IntervalIndexKey::left_border(IndexId(4), &[1], ordered::from_i64(5));
		let right = IntervalIndexKey::right_border(IndexId(4), &[1], ordered::from_i64(5));
		assert!(key(4, u64::MAX).encode() < left);
		assert!(left < key(5, 0).encode());
		assert!(key(5, u64::MAX - 1).encode() < right);
		assert!(right < key(6, 0).encode());
	}
}
