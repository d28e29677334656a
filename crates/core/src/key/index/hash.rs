// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{U64_LEN, group_prefix, split_u64s};
use crate::{
	EncodableKey, EncodedKey,
	interface::catalog::{IndexId, RecordId},
};

/// `index ‖ h(f1) … h(fk) ‖ id`, existence only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashIndexKey {
	pub index: IndexId,
	pub hashes: Vec<u64>,
	pub id: RecordId,
}

impl HashIndexKey {
	pub fn prefix(index: IndexId, hashes: &[u64]) -> EncodedKey {
		group_prefix(index, hashes).to_encoded_key()
	}
}

impl EncodableKey for HashIndexKey {
	fn encode(&self) -> EncodedKey {
		let mut serializer = group_prefix(self.index, &self.hashes);
		serializer.extend_u64(self.id);
		serializer.to_encoded_key()
	}

	fn decode(key: &[u8]) -> Option<Self> {
		if key.len() < 2 * U64_LEN {
			return None;
		}
		let mut parts = split_u64s(key)?;
		let id = RecordId(parts.pop()?);
		let index = IndexId(parts.remove(0));
		Some(Self {
			index,
			hashes: parts,
			id,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::HashIndexKey;
	use crate::{
		EncodableKey,
		interface::catalog::{IndexId, RecordId},
	};

	#[test]
	fn test_encode_decode() {
		let key = HashIndexKey {
			index: IndexId(1),
			hashes: vec![0xAB, 0xCD],
			id: RecordId(42),
		};
		let encoded = key.encode();
		assert_eq!(encoded.len(), 32);
		assert_eq!(&encoded[24..], &[0, 0, 0, 0, 0, 0, 0, 42]);
		assert_eq!(HashIndexKey::decode(&encoded).unwrap(), key);
	}

	#[test]
	fn test_prefix_groups_ids() {
		let prefix = HashIndexKey::prefix(IndexId(1), &[7]);
		for id in [1, 100, u64::MAX] {
			let key = HashIndexKey {
				index: IndexId(1),
				hashes: vec![7],
				id: RecordId(id),
			};
			assert!(key.encode().starts_with(&prefix));
		}
	}

	#[test]
	fn test_decode_rejects_short_key() {
		assert!(HashIndexKey::decode(&[0, 0, 0, 0, 0, 0, 0, 1]).is_none());
	}
}
