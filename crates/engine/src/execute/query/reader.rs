// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use tessera_core::{
	CorruptionError, EncodableKey, Error, Record, Result,
	interface::catalog::{FieldId, RecordId, TableDef},
	key::RecordKey,
};
use tessera_store::{Direction, Entry, StoreCursor, StoreRead};
use tessera_type::Value;

/// Materializes records from the runs of a table's data column family.
///
/// A run is a beginning marker followed by the field entries of the same id.
/// Fields outside the projection are skipped without decoding.
#[derive(Clone)]
pub(crate) struct RecordReader {
	table: TableDef,
	projection: Option<BTreeSet<FieldId>>,
}

impl RecordReader {
	pub(crate) fn new(table: TableDef, projection: Option<BTreeSet<FieldId>>) -> Self {
		Self {
			table,
			projection,
		}
	}

	/// Reads the run starting at `first` and returns the record together with
	/// the first entry past the run, if any. `first` must be a beginning
	/// marker.
	pub(crate) fn read_run(&self, cursor: &mut StoreCursor, first: Entry) -> Result<(Record, Option<Entry>)> {
		let id = match self.decode_key(&first)? {
			RecordKey::Begin(id) => id,
			RecordKey::Field(id, _) => return Err(self.unexpected_end(id)),
		};

		let mut record = Record::new(self.table.id, id);
		let next = loop {
			let Some(entry) = cursor.step(Direction::Forward) else {
				break None;
			};
			match self.decode_key(&entry)? {
				RecordKey::Field(field_id, field) if field_id == id => self.load_field(&mut record, field, &entry)?,
				_ => break Some(entry),
			}
		};
		record.mark_unchanged();
		Ok((record, next))
	}

	/// Point lookup of one record; `None` when no run exists for `id`.
	pub(crate) fn get(&self, reader: &impl StoreRead, id: RecordId) -> Result<Option<Record>> {
		let mut cursor = reader.cursor(&self.table.data_column_family())?;
		let Some(first) = cursor.seek(&RecordKey::record_prefix(id)) else {
			return Ok(None);
		};

		match self.decode_key(&first)? {
			RecordKey::Begin(found) if found == id => {}
			RecordKey::Field(found, _) if found == id => return Err(self.unexpected_end(id)),
			_ => return Ok(None),
		}

		let (record, _) = self.read_run(&mut cursor, first)?;
		Ok(Some(record))
	}

	fn load_field(&self, record: &mut Record, field: FieldId, entry: &Entry) -> Result<()> {
		if let Some(projection) = &self.projection {
			if !projection.contains(&field) {
				return Ok(());
			}
		}

		let def = self.table.field_by_id(field).ok_or_else(|| CorruptionError::UnknownField {
			column_family: self.table.data_column_family(),
			id: record.id().0,
			field: field.0,
		})?;
		let value = Value::decode(def.ty, &entry.value).map_err(|source| CorruptionError::Value {
			id: record.id().0,
			field: field.0,
			source,
		})?;
		record.set(field, value);
		Ok(())
	}

	fn decode_key(&self, entry: &Entry) -> Result<RecordKey> {
		RecordKey::decode(&entry.key).ok_or_else(|| {
			CorruptionError::KeyCorrupted {
				column_family: self.table.data_column_family(),
				key: entry.key.0.clone(),
			}
			.into()
		})
	}

	fn unexpected_end(&self, id: RecordId) -> Error {
		CorruptionError::UnexpectedEndOfRecord {
			column_family: self.table.data_column_family(),
			id: id.0,
		}
		.into()
	}
}
