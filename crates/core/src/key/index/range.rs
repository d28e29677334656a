// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{U64_LEN, group_prefix, split_u64s};
use crate::{
	EncodedKey,
	interface::catalog::{IndexId, RecordId},
};

/// `index ‖ h(hashed…) ‖ ordered(begin) ‖ id` with `ordered(end)` as value.
///
/// Entries are ordered by the beginning of the stored interval; the end rides
/// along in the value so an overlap query is a single begin-ordered sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeIndexKey {
	pub index: IndexId,
	pub hashes: Vec<u64>,
	pub begin: u64,
	pub end: u64,
	pub id: RecordId,
}

impl RangeIndexKey {
	pub fn prefix(index: IndexId, hashes: &[u64]) -> EncodedKey {
		group_prefix(index, hashes).to_encoded_key()
	}

	/// Sorts after every entry of the group whose begin is at most `begin`.
	pub fn right_border(index: IndexId, hashes: &[u64], begin: u64) -> EncodedKey {
		let mut serializer = group_prefix(index, hashes);
		serializer.extend_u64(begin).extend_u64(u64::MAX);
		serializer.to_encoded_key()
	}

	pub fn encode_key(&self) -> EncodedKey {
		let mut serializer = group_prefix(self.index, &self.hashes);
		serializer.extend_u64(self.begin).extend_u64(self.id);
		serializer.to_encoded_key()
	}

	pub fn encode_value(&self) -> Vec<u8> {
		self.end.to_be_bytes().to_vec()
	}

	pub fn decode(key: &[u8], value: &[u8]) -> Option<Self> {
		if key.len() < 3 * U64_LEN {
			return None;
		}
		let mut parts = split_u64s(key)?;
		let id = RecordId(parts.pop()?);
		let begin = parts.pop()?;
		let index = IndexId(parts.remove(0));
		let end = Self::end_of(value)?;
		Some(Self {
			index,
			hashes: parts,
			begin,
			end,
			id,
		})
	}

	pub fn end_of(value: &[u8]) -> Option<u64> {
		let bytes: [u8; U64_LEN] = value.try_into().ok()?;
		Some(u64::from_be_bytes(bytes))
	}
}
