// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use tessera_core::{
	EncodableKey, ForeignDependencyError, Record, Result, SchemaError,
	interface::catalog::{RecordId, TableDef},
	key::RecordKey,
};
use tessera_store::StoreRead;
use tracing::{instrument, trace};

use crate::{CommandTransaction, execute::query::reader::RecordReader, index::record_entries};

impl CommandTransaction<'_> {
	/// Writes `record` and brings every index of its table in line with it.
	///
	/// A new record is written whole. For a stored record only the fields
	/// set or cleared since it was loaded are written; a cleared field has its
	/// key removed and the others are left as stored. Foreign keys must point
	/// at an existing record of the foreign table.
	#[instrument(name = "transaction::save", level = "trace", skip_all, fields(table = %record.table(), id = %record.id()))]
	pub fn save(&mut self, record: &Record) -> Result<()> {
		let table = self.table_of(record)?;
		self.validate(&table, record)?;

		let old = RecordReader::new(table.clone(), None).get(&self.txn, record.id())?;
		let (old_entries, merged) = match &old {
			Some(old) => {
				let mut merged = old.clone();
				for (field, value) in record.changes() {
					merged.set_option(field, value.cloned());
				}
				(record_entries(&table, old)?, merged)
			}
			None => (BTreeSet::new(), record.clone()),
		};
		let new_entries = record_entries(&table, &merged)?;

		let index_cf = table.index_column_family();
		let new_keys: BTreeSet<_> = new_entries.iter().map(|entry| &entry.key).collect();
		for entry in &old_entries {
			if !new_keys.contains(&entry.key) {
				self.txn.single_delete(&index_cf, entry.key.clone())?;
			}
		}
		for entry in new_entries.difference(&old_entries) {
			self.txn.put(&index_cf, entry.key.clone(), entry.value.clone())?;
		}

		let data_cf = table.data_column_family();
		if old.is_none() {
			self.txn.put(&data_cf, RecordKey::Begin(record.id()).encode(), Vec::new())?;
			for (field, value) in record.values() {
				self.txn.put(&data_cf, RecordKey::Field(record.id(), field).encode(), value.encode())?;
			}
		} else {
			for (field, value) in record.changes() {
				let key = RecordKey::Field(record.id(), field).encode();
				match value {
					Some(value) => self.txn.put(&data_cf, key, value.encode())?,
					None => self.txn.single_delete(&data_cf, key)?,
				}
			}
		}

		trace!(created = old.is_none(), "saved");
		Ok(())
	}

	fn validate(&self, table: &TableDef, record: &Record) -> Result<()> {
		for (field, value) in record.values() {
			let def = table.field_by_id(field).ok_or_else(|| SchemaError::FieldNotFound {
				table: table.qualified_name(),
				field: field.to_string(),
			})?;

			let found = value.get_type();
			if found != def.ty {
				return Err(SchemaError::TypeMismatch {
					field: def.name.clone(),
					expected: def.ty,
					found,
				}
				.into());
			}

			let Some(foreign) = def.foreign_table else {
				continue;
			};
			let target = self.schema.get_table_by_id(foreign)?;
			let id = value.as_integer().unwrap_or_default();
			let exists = match u64::try_from(id) {
				Ok(id) => {
					let marker = RecordKey::Begin(RecordId(id)).encode();
					self.txn.get(&target.data_column_family(), &marker)?.is_some()
				}
				Err(_) => false,
			};
			if !exists {
				return Err(ForeignDependencyError::MissingTarget {
					field: def.name.clone(),
					table: target.qualified_name(),
					id: id as u64,
				}
				.into());
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use tessera_core::{
		EncodableKey, Error, ForeignDependencyError, SchemaError,
		interface::catalog::FieldId,
		key::RecordKey,
	};
	use tessera_store::StoreRead;
	use tessera_type::Value;

	use crate::{
		HashFilter, IntervalFilter, Query,
		index::record_entries,
		test_utils::{file_table, folder_tables, insert_file},
	};

	#[test]
	fn test_update_moves_index_entries() {
		let (engine, table) = file_table();
		let mut record = insert_file(&engine, "draft", 5);

		record.set(FieldId(1), "final").set(FieldId(2), 8);
		engine.execute_transactional(|txn| txn.save(&record)).unwrap();

		assert_eq!(engine.select("file", "app", HashFilter::new().with("size", 5)).unwrap().count(), 0);
		assert_eq!(engine.select("file", "app", HashFilter::new().with("size", 8)).unwrap().count(), 1);
		assert_eq!(engine.select("file", "app", HashFilter::new().with("name", "draft")).unwrap().count(), 0);
		assert_eq!(engine.select("file", "app", IntervalFilter::new("size", 0, 10)).unwrap().count(), 1);

		let stored = engine.get_by_id("file", "app", record.id()).unwrap().unwrap();
		assert_eq!(stored, record);
		assert_eq!(stored.table(), table.id);
	}

	#[test]
	fn test_null_field_deleted() {
		let (engine, table) = file_table();
		let mut record = insert_file(&engine, "a", 5);

		record.clear(FieldId(2));
		engine.execute_transactional(|txn| txn.save(&record)).unwrap();

		let key = RecordKey::Field(record.id(), FieldId(2)).encode();
		assert!(engine.store().get(&table.data_column_family(), &key).unwrap().is_none());
		assert_eq!(engine.select("file", "app", IntervalFilter::new("size", i64::MIN, i64::MAX)).unwrap().count(), 0);

		let stored = engine.get_by_id("file", "app", record.id()).unwrap().unwrap();
		assert_eq!(stored.get(FieldId(2)), None);
		assert_eq!(stored.get(FieldId(1)), Some(&Value::string("a")));
	}

	#[test]
	fn test_projected_record_keeps_unloaded_fields() {
		let (engine, table) = file_table();
		let record = insert_file(&engine, "report", 7);

		let query = Query::from(HashFilter::new().with("size", 7)).with_fields(&["size"]);
		let mut partial = engine.select("file", "app", query).unwrap().next().unwrap().unwrap();
		assert_eq!(partial.get(FieldId(1)), None);
		partial.set(FieldId(2), 8);
		engine.execute_transactional(|txn| txn.save(&partial)).unwrap();

		let stored = engine.get_by_id("file", "app", record.id()).unwrap().unwrap();
		assert_eq!(stored.get(FieldId(1)), Some(&Value::string("report")));
		assert_eq!(stored.get(FieldId(2)), Some(&Value::integer(8)));
		assert_eq!(engine.select("file", "app", HashFilter::new().with("name", "report")).unwrap().count(), 1);
		assert_eq!(engine.select("file", "app", HashFilter::new().with("size", 7)).unwrap().count(), 0);
		assert_eq!(engine.select("file", "app", HashFilter::new().with("size", 8)).unwrap().count(), 1);

		// every index entry matches a fresh computation over the stored record
		let expected: BTreeSet<_> = record_entries(&table, &stored).unwrap().into_iter().map(|e| e.key).collect();
		let actual: BTreeSet<_> = engine.store().cursor(&table.index_column_family()).unwrap().map(|e| e.key).collect();
		assert_eq!(actual, expected);
	}

	#[test]
	fn test_unchanged_save_is_a_no_op() {
		let (engine, table) = file_table();
		let record = insert_file(&engine, "kept", 3);
		let before: Vec<_> = engine.store().cursor(&table.data_column_family()).unwrap().collect();

		let loaded = engine.get_by_id("file", "app", record.id()).unwrap().unwrap();
		assert_eq!(loaded.changes().count(), 0);
		engine.execute_transactional(|txn| txn.save(&loaded)).unwrap();

		let after: Vec<_> = engine.store().cursor(&table.data_column_family()).unwrap().collect();
		assert_eq!(after, before);
	}

	#[test]
	fn test_empty_record_keeps_marker() {
		let (engine, _) = file_table();
		let id = engine
			.execute_transactional(|txn| {
				let record = txn.create("file", "app")?;
				txn.save(&record)?;
				Ok(record.id())
			})
			.unwrap();
		let stored = engine.get_by_id("file", "app", id).unwrap().unwrap();
		assert!(stored.is_empty());
		assert_eq!(engine.select("file", "app", Query::all()).unwrap().count(), 1);
	}

	#[test]
	fn test_type_mismatch() {
		let (engine, _) = file_table();
		let err = engine
			.execute_transactional(|txn| {
				let mut record = txn.create("file", "app")?;
				record.set(FieldId(2), "not a number");
				txn.save(&record)
			})
			.unwrap_err();
		assert!(matches!(err.root(), Error::Schema(SchemaError::TypeMismatch { .. })));
	}

	#[test]
	fn test_unknown_field() {
		let (engine, _) = file_table();
		let err = engine
			.execute_transactional(|txn| {
				let mut record = txn.create("file", "app")?;
				record.set(FieldId(77), 1);
				txn.save(&record)
			})
			.unwrap_err();
		assert!(matches!(err.root(), Error::Schema(SchemaError::FieldNotFound { .. })));
	}

	#[test]
	fn test_foreign_key_target_must_exist() {
		let engine = folder_tables();
		let err = engine
			.execute_transactional(|txn| {
				let mut file = txn.create("file", "app")?;
				file.set(FieldId(2), 7);
				txn.save(&file)
			})
			.unwrap_err();
		assert!(matches!(err.root(), Error::ForeignDependency(ForeignDependencyError::MissingTarget { id: 7, .. })));

		// target created in the same transaction
		let id = engine
			.execute_transactional(|txn| {
				let folder = txn.create("folder", "app")?;
				txn.save(&folder)?;
				let mut file = txn.create("file", "app")?;
				file.set(FieldId(2), folder.id().0 as i64);
				txn.save(&file)?;
				Ok(file.id())
			})
			.unwrap();
		assert!(engine.get_by_id("file", "app", id).unwrap().is_some());
	}
}
