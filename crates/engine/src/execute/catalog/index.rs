// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_catalog::IndexToCreate;
use tessera_core::{Result, interface::catalog::IndexDef, key::IndexKeyRange};
use tracing::{debug, instrument};

use crate::Schema;

impl Schema {
	/// Declares an index and builds it over the stored records. Asking for the
	/// implicit index of a foreign key returns that index.
	#[instrument(name = "schema::create_index", level = "debug", skip(self))]
	pub fn create_index(&self, table: &str, namespace: &str, index: IndexToCreate) -> Result<IndexDef> {
		let def = self.get_table(table, namespace)?;
		let index = self.add_index(def.id, &index)?;
		self.catalog.save()?;
		Ok(index)
	}

	/// Removes an index and all of its entries. Returns `false` when the table
	/// has no such index. The implicit index of a foreign key is never
	/// dropped; asking for it succeeds without effect.
	#[instrument(name = "schema::drop_index", level = "debug", skip(self))]
	pub fn drop_index(&self, table: &str, namespace: &str, index: IndexToCreate) -> Result<bool> {
		let def = self.get_table(table, namespace)?;
		let kind = index.resolve(&def)?;
		if def.is_foreign_key_index(&kind) {
			return Ok(true);
		}

		let Some(index) = self.catalog.remove_index(def.id, &kind)? else {
			return Ok(false);
		};

		let range = IndexKeyRange::of(index.id);
		let mut txn = self.store().begin();
		txn.delete_range(&def.index_column_family(), range.start, range.end)?;
		txn.commit()?;

		self.catalog.save()?;
		debug!(id = %index.id, "index dropped");
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use tessera_catalog::{FieldToCreate, IndexToCreate};
	use tessera_core::{
		Error, SchemaError,
		interface::catalog::{FieldId, IndexKind},
	};
	use tessera_store::{Entry, StoreRead};
	use tessera_type::Type;

	use crate::{
		Engine, HashFilter, IntervalFilter, Query,
		test_utils::{file_table, folder_tables, insert_file},
	};

	fn index_entries(engine: &Engine, column_family: &str) -> Vec<Entry> {
		engine.store().cursor(column_family).unwrap().collect()
	}

	#[test]
	fn test_create_index_builds_existing_records() {
		let (engine, table) = file_table();
		engine.schema().drop_index("file", "app", IndexToCreate::hash(&["size"])).unwrap();
		for size in [4, 4, 9] {
			insert_file(&engine, "f", size);
		}

		let index = engine.schema().create_index("file", "app", IndexToCreate::hash(&["size"])).unwrap();
		assert_eq!(engine.select("file", "app", HashFilter::new().with("size", 4)).unwrap().count(), 2);
		assert!(engine.schema().get_table("file", "app").unwrap().index(index.id).is_some());
		assert_ne!(index.id, table.indexes[0].id);
	}

	#[test]
	fn test_create_index_errors() {
		let (engine, _) = file_table();
		let err = engine.schema().create_index("file", "app", IndexToCreate::hash(&["size"])).unwrap_err();
		assert!(matches!(err, Error::Schema(SchemaError::IndexAlreadyExists { .. })));

		let err = engine.schema().create_index("file", "app", IndexToCreate::hash(&["missing"])).unwrap_err();
		assert!(matches!(err, Error::Schema(SchemaError::FieldNotFound { .. })));

		let err = engine.schema().create_index("file", "app", IndexToCreate::interval(&[], "name")).unwrap_err();
		assert!(matches!(err, Error::Schema(SchemaError::InvalidIndex { .. })));
	}

	#[test]
	fn test_failed_build_is_not_declared() {
		let (engine, _) = file_table();
		engine.schema().create_field("file", "app", FieldToCreate::new("floor", Type::Integer)).unwrap();
		let mut record = insert_file(&engine, "a", 1);
		record.set(FieldId(3), 5);
		engine.execute_transactional(|txn| txn.save(&record)).unwrap();

		let before = engine.schema().get_table("file", "app").unwrap();
		let err = engine.schema().create_index("file", "app", IndexToCreate::range(&[], "floor", "size")).unwrap_err();
		assert!(matches!(err, Error::InvalidRange { .. }));
		assert_eq!(engine.schema().get_table("file", "app").unwrap().indexes, before.indexes);
	}

	#[test]
	fn test_drop_index_removes_entries() {
		let (engine, table) = file_table();
		for size in 1..=5 {
			insert_file(&engine, "f", size);
		}
		let records_before: Vec<Entry> = engine.store().cursor(&table.data_column_family()).unwrap().collect();

		for index in [
			IndexToCreate::hash(&["size"]),
			IndexToCreate::hash(&["name"]),
			IndexToCreate::prefix(&["name"]),
			IndexToCreate::interval(&[], "size"),
		] {
			assert!(engine.schema().drop_index("file", "app", index).unwrap());
		}

		assert!(index_entries(&engine, &table.index_column_family()).is_empty());
		let records_after: Vec<Entry> = engine.store().cursor(&table.data_column_family()).unwrap().collect();
		assert_eq!(records_after, records_before);
		assert_eq!(engine.select("file", "app", Query::all()).unwrap().count(), 5);
		assert!(engine.select("file", "app", IntervalFilter::new("size", 1, 5)).is_err());

		assert!(!engine.schema().drop_index("file", "app", IndexToCreate::hash(&["size"])).unwrap());
	}

	#[test]
	fn test_foreign_key_index_kept() {
		let engine = folder_tables();
		let created = engine.schema().create_index("file", "app", IndexToCreate::hash(&["folder"])).unwrap();
		let file = engine.schema().get_table("file", "app").unwrap();
		assert_eq!(file.indexes.len(), 1);
		assert_eq!(file.indexes[0], created);

		assert!(engine.schema().drop_index("file", "app", IndexToCreate::hash(&["folder"])).unwrap());
		let file = engine.schema().get_table("file", "app").unwrap();
		assert!(matches!(file.indexes[0].kind, IndexKind::Hash { .. }));
	}
}
