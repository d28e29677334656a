// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_catalog::FieldToCreate;
use tessera_core::{
	Result,
	interface::catalog::FieldDef,
	key::{IndexKeyRange, RecordKey},
};
use tessera_store::StoreRead;
use tracing::{debug, instrument};

use crate::Schema;

impl Schema {
	#[instrument(name = "schema::create_field", level = "debug", skip(self, field), fields(field = %field.name))]
	pub fn create_field(&self, table: &str, namespace: &str, field: FieldToCreate) -> Result<FieldDef> {
		let def = self.get_table(table, namespace)?;
		let field = self.add_field(def.id, &field)?;
		self.catalog.save()?;
		Ok(field)
	}

	/// Drops a field, every index reading it and every stored value of it,
	/// all in one store transaction. Returns `false` when there is no such
	/// field.
	#[instrument(name = "schema::drop_field", level = "debug", skip(self))]
	pub fn drop_field(&self, table: &str, namespace: &str, field: &str) -> Result<bool> {
		let def = self.get_table(table, namespace)?;
		let Some((field, indexes)) = self.catalog.remove_field(def.id, field)? else {
			return Ok(false);
		};

		let mut txn = self.store().begin();
		let index_cf = def.index_column_family();
		for index in &indexes {
			let range = IndexKeyRange::of(index.id);
			txn.delete_range(&index_cf, range.start, range.end)?;
		}

		let data_cf = def.data_column_family();
		let pattern = RecordKey::field_pattern(field.id);
		let mut cursor = txn.cursor(&data_cf)?;
		let mut keys = Vec::new();
		let mut next = cursor.seek_pattern(&pattern);
		while let Some(entry) = next {
			keys.push(entry.key);
			next = cursor.next_matching(&pattern);
		}
		let values = keys.len();
		for key in keys {
			txn.single_delete(&data_cf, key)?;
		}

		txn.commit()?;
		self.catalog.save()?;
		debug!(indexes = indexes.len(), values, "field dropped");
		Ok(true)
	}

	/// Returns `false` when the table has no field called `old`.
	#[instrument(name = "schema::rename_field", level = "debug", skip(self))]
	pub fn rename_field(&self, table: &str, namespace: &str, old: &str, new: &str) -> Result<bool> {
		let def = self.get_table(table, namespace)?;
		if !self.catalog.rename_field(def.id, old, new)? {
			return Ok(false);
		}
		self.catalog.save()?;
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use tessera_catalog::FieldToCreate;
	use tessera_core::{
		EncodableKey, Error, SchemaError,
		interface::catalog::{FieldId, IndexId},
		key::{IndexKeyRange, RecordKey},
	};
	use tessera_store::StoreRead;
	use tessera_type::{Type, Value};

	use crate::{
		HashFilter, IntervalFilter,
		test_utils::{file_table, folder_tables, insert_file},
	};

	#[test]
	fn test_create_field() {
		let (engine, _) = file_table();
		let record = insert_file(&engine, "a", 1);

		let field = engine.schema().create_field("file", "app", FieldToCreate::new("owner", Type::String)).unwrap();
		assert_eq!(field.id, FieldId(3));

		let mut record = engine.get_by_id("file", "app", record.id()).unwrap().unwrap();
		assert_eq!(record.get(field.id), None);
		record.set(field.id, "me");
		engine.execute_transactional(|txn| txn.save(&record)).unwrap();
		let stored = engine.get_by_id("file", "app", record.id()).unwrap().unwrap();
		assert_eq!(stored.get(field.id), Some(&Value::string("me")));

		let err = engine.schema().create_field("file", "app", FieldToCreate::new("owner", Type::String)).unwrap_err();
		assert!(matches!(err, Error::Schema(SchemaError::FieldAlreadyExists { .. })));
	}

	#[test]
	fn test_create_foreign_field_needs_table() {
		let (engine, _) = file_table();
		let err = engine.schema().create_field("file", "app", FieldToCreate::foreign("owner", "app", "user")).unwrap_err();
		assert!(matches!(err, Error::Schema(SchemaError::TableNotFound { .. })));
	}

	#[test]
	fn test_create_foreign_field_indexes_existing_records() {
		let engine = folder_tables();
		engine
			.execute_transactional(|txn| {
				let folder = txn.create("folder", "app")?;
				txn.save(&folder)
			})
			.unwrap();

		let field = engine.schema().create_field("folder", "app", FieldToCreate::foreign("parent", "app", "folder")).unwrap();
		let folder = engine.schema().get_table("folder", "app").unwrap();
		let index = folder.indexes.iter().find(|i| i.kind.contains(field.id)).unwrap();

		let range = IndexKeyRange::of(index.id);
		let entries = engine
			.store()
			.cursor(&folder.index_column_family())
			.unwrap()
			.filter(|e| e.key >= range.start && e.key < range.end)
			.count();
		assert_eq!(entries, 1);
	}

	#[test]
	fn test_drop_field() {
		let (engine, table) = file_table();
		let a = insert_file(&engine, "a", 1);
		let b = insert_file(&engine, "b", 2);

		assert!(engine.schema().drop_field("file", "app", "size").unwrap());

		for id in [a.id(), b.id()] {
			let key = RecordKey::Field(id, FieldId(2)).encode();
			assert!(engine.store().get(&table.data_column_family(), &key).unwrap().is_none());
			let record = engine.get_by_id("file", "app", id).unwrap().unwrap();
			assert_eq!(record.len(), 1);
		}

		// the hash and interval indexes over size are gone with their entries
		let dropped: Vec<IndexId> =
			table.indexes.iter().filter(|i| i.kind.contains(FieldId(2))).map(|i| i.id).collect();
		assert_eq!(dropped.len(), 2);
		for id in dropped {
			let range = IndexKeyRange::of(id);
			let left = engine
				.store()
				.cursor(&table.index_column_family())
				.unwrap()
				.filter(|e| e.key >= range.start && e.key < range.end)
				.count();
			assert_eq!(left, 0);
		}

		let current = engine.schema().get_table("file", "app").unwrap();
		assert_eq!(current.indexes.len(), table.indexes.len() - 2);
		assert!(engine.select("file", "app", HashFilter::new().with("size", 1)).is_err());
		assert!(engine.select("file", "app", IntervalFilter::new("size", 0, 5)).is_err());
		assert_eq!(engine.select("file", "app", HashFilter::new().with("name", "a")).unwrap().count(), 1);

		assert!(!engine.schema().drop_field("file", "app", "size").unwrap());
	}

	#[test]
	fn test_rename_field() {
		let (engine, _) = file_table();
		insert_file(&engine, "a", 7);

		assert!(engine.schema().rename_field("file", "app", "size", "bytes").unwrap());
		assert_eq!(engine.select("file", "app", HashFilter::new().with("bytes", 7)).unwrap().count(), 1);

		let err = engine.schema().rename_field("file", "app", "bytes", "name").unwrap_err();
		assert!(matches!(err, Error::Schema(SchemaError::FieldAlreadyExists { .. })));
		assert!(!engine.schema().rename_field("file", "app", "size", "other").unwrap());
	}
}
