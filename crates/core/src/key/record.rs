// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{EncodableKey, KeyPattern};
use crate::{
	EncodedKey,
	encoding::keycode::{KeyDeserializer, KeySerializer},
	interface::catalog::{FieldId, RecordId},
};

const ID_LEN: usize = 8;
const FIELD_LEN: usize = 4;

/// Key of one entry in a table's data column family.
///
/// Every record starts with a [`RecordKey::Begin`] entry holding an empty
/// value, followed by one [`RecordKey::Field`] entry per non-null field. The
/// begin key is the bare id, so it sorts first within the record's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
	Begin(RecordId),
	Field(RecordId, FieldId),
}

impl RecordKey {
	pub fn id(&self) -> RecordId {
		match self {
			RecordKey::Begin(id) | RecordKey::Field(id, _) => *id,
		}
	}

	pub fn field(&self) -> Option<FieldId> {
		match self {
			RecordKey::Begin(_) => None,
			RecordKey::Field(_, field) => Some(*field),
		}
	}

	/// Prefix shared by every key of one record.
	pub fn record_prefix(id: RecordId) -> EncodedKey {
		RecordKey::Begin(id).encode()
	}

	/// The half-open key range holding every key of one record.
	pub fn record_range(id: RecordId) -> (EncodedKey, EncodedKey) {
		let end = match id.0.checked_add(1) {
			Some(next) => RecordKey::Begin(RecordId(next)).encode(),
			None => EncodedKey::new(vec![0xff; ID_LEN + 1]),
		};
		(Self::record_prefix(id), end)
	}

	/// All keys of one record.
	pub fn record_pattern(id: RecordId) -> KeyPattern {
		KeyPattern::new(Self::record_prefix(id).0)
	}

	/// The field's entries across all records of a table.
	pub fn field_pattern(field: FieldId) -> KeyPattern {
		KeyPattern::all().with_postfix(ID_LEN, field.0.to_be_bytes().to_vec())
	}
}

impl EncodableKey for RecordKey {
	fn encode(&self) -> EncodedKey {
		let mut serializer = KeySerializer::with_capacity(ID_LEN + FIELD_LEN);
		match self {
			RecordKey::Begin(id) => {
				serializer.extend_u64(*id);
			}
			RecordKey::Field(id, field) => {
				serializer.extend_u64(*id).extend_u32(field.0);
			}
		}
		serializer.to_encoded_key()
	}

	fn decode(key: &[u8]) -> Option<Self> {
		let mut de = KeyDeserializer::from_bytes(key);
		let id = RecordId(de.read_u64().ok()?);
		match key.len() {
			ID_LEN => Some(RecordKey::Begin(id)),
			len if len == ID_LEN + FIELD_LEN => Some(RecordKey::Field(id, FieldId(de.read_u32().ok()?))),
			_ => None,
		}
	}
}
