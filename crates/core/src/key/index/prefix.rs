// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	EncodableKey, EncodedKey,
	encoding::keycode::{KeyDeserializer, KeySerializer},
	interface::catalog::{IndexId, RecordId},
};

/// `index ‖ escaped(lexeme) ‖ 0x0000 ‖ id`, one entry per lexeme and record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixIndexKey {
	pub index: IndexId,
	pub lexeme: String,
	pub id: RecordId,
}

impl PrefixIndexKey {
	/// Prefix of every entry whose lexeme starts with `lexeme`.
	pub fn scan_prefix(index: IndexId, lexeme: &str) -> EncodedKey {
		let mut serializer = KeySerializer::with_capacity(8 + lexeme.len());
		serializer.extend_u64(index).extend_bytes_prefix(lexeme.as_bytes());
		serializer.to_encoded_key()
	}
}

impl EncodableKey for PrefixIndexKey {
	fn encode(&self) -> EncodedKey {
		let mut serializer = KeySerializer::with_capacity(18 + self.lexeme.len());
		serializer.extend_u64(self.index).extend_bytes(self.lexeme.as_bytes()).extend_u64(self.id);
		serializer.to_encoded_key()
	}

	fn decode(key: &[u8]) -> Option<Self> {
		let mut de = KeyDeserializer::from_bytes(key);
		let index = IndexId(de.read_u64().ok()?);
		let lexeme = String::from_utf8(de.read_bytes().ok()?).ok()?;
		let id = RecordId(de.read_u64().ok()?);
		if !de.is_empty() {
			return None;
		}
		Some(Self {
			index,
			lexeme,
			id,
		})
	}
}
