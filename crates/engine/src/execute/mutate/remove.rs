// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use tessera_core::{
	EncodableKey, ForeignDependencyError, KeyPattern, Result,
	hash::hash_value,
	interface::catalog::{FieldDef, IndexKind, RecordId, TableDef},
	key::{HashIndexKey, RecordKey},
};
use tessera_store::StoreRead;
use tessera_type::Value;
use tracing::{instrument, trace, warn};

use crate::{
	CommandTransaction,
	execute::query::{Cursor, Projection, RecordScan, corrupted_key, reader::RecordReader},
	index::record_entries,
};

impl CommandTransaction<'_> {
	/// Deletes a record with its index entries. Returns `false` when there is
	/// no such record.
	///
	/// A record still referenced through a foreign key of any table is kept
	/// and the removal fails.
	#[instrument(name = "transaction::remove", level = "trace", skip(self))]
	pub fn remove(&mut self, table: &str, namespace: &str, id: RecordId) -> Result<bool> {
		let table = self.schema.get_table(table, namespace)?;
		let Some(old) = RecordReader::new(table.clone(), None).get(&self.txn, id)? else {
			return Ok(false);
		};

		self.check_references(&table, id)?;

		let index_cf = table.index_column_family();
		for entry in record_entries(&table, &old)? {
			self.txn.single_delete(&index_cf, entry.key)?;
		}

		let (begin, end) = RecordKey::record_range(id);
		self.txn.delete_range(&table.data_column_family(), begin, end)?;

		trace!("removed");
		Ok(true)
	}

	fn check_references(&self, target: &TableDef, id: RecordId) -> Result<()> {
		for referencing in self.schema.tables() {
			for field in referencing.fields.iter().filter(|f| f.foreign_table == Some(target.id)) {
				let found = self.referencing_records(&referencing, field, id)?;
				// a record pointing at itself does not hold itself alive
				let blocking = if referencing.id == target.id {
					found.into_iter().find(|by| *by != id)
				} else {
					found.into_iter().next()
				};
				if blocking.is_some() {
					return Err(ForeignDependencyError::Referenced {
						table: target.qualified_name(),
						id: id.0,
						by: format!("{}.{}", referencing.qualified_name(), field.name),
					}
					.into());
				}
			}
		}
		Ok(())
	}

	/// Ids of `table` records whose `field` holds `id`, read through the
	/// implicit hash index of the foreign key.
	fn referencing_records(&self, table: &TableDef, field: &FieldDef, id: RecordId) -> Result<BTreeSet<RecordId>> {
		let value = Value::Integer(id.0 as i64);
		let kind = IndexKind::Hash {
			fields: vec![field.id],
		};

		let Some(index) = table.index_by_kind(&kind) else {
			warn!(table = %table.qualified_name(), field = %field.name, "foreign key index missing, scanning");
			return self.scan_references(table, field, &value);
		};

		let column_family = table.index_column_family();
		let pattern = KeyPattern::new(HashIndexKey::prefix(index.id, &[hash_value(Some(&value)).value]).0);
		let mut cursor = self.txn.cursor(&column_family)?;
		let mut found = BTreeSet::new();
		let mut next = cursor.seek_pattern(&pattern);
		while let Some(entry) = next {
			let key = HashIndexKey::decode(&entry.key).ok_or_else(|| corrupted_key(&column_family, &entry.key))?;
			found.insert(key.id);
			next = cursor.next_matching(&pattern);
		}
		Ok(found)
	}

	fn scan_references(&self, table: &TableDef, field: &FieldDef, value: &Value) -> Result<BTreeSet<RecordId>> {
		let snapshot = self.txn.snapshot();
		let projection = Projection::new(Some(BTreeSet::from([field.id])));
		let mut found = BTreeSet::new();
		for record in Cursor::new(RecordScan::open(&snapshot, table.clone(), projection)?) {
			let record = record?;
			if record.get(field.id) == Some(value) {
				found.insert(record.id());
			}
		}
		Ok(found)
	}
}
