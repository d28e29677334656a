// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	ForeignDependencyError, Result, SchemaError,
	interface::catalog::{TableDef, TableId},
};
use tessera_store::StoreRead;
use tracing::debug;

use crate::Catalog;

impl Catalog {
	/// Declares an empty table. The id is fresh: greater than every id in
	/// the catalog and not backing any leftover column family.
	pub fn new_table(&self, namespace: &str, name: &str) -> Result<TableDef> {
		let mut tables = self.tables.write();
		if tables.iter().any(|t| t.namespace == namespace && t.name == name) {
			return Err(SchemaError::TableAlreadyExists {
				namespace: namespace.to_string(),
				name: name.to_string(),
			}
			.into());
		}

		let mut id = TableId(tables.iter().map(|t| t.id.0).max().unwrap_or(0) + 1);
		let mut table = TableDef::new(id, namespace, name);
		while self.store.contains_column_family(&table.data_column_family())
			|| self.store.contains_column_family(&table.index_column_family())
		{
			id = TableId(id.0 + 1);
			table = TableDef::new(id, namespace, name);
		}

		debug!(table = %table.qualified_name(), id = %id, "table declared");
		tables.push(table.clone());
		Ok(table)
	}

	/// Removes a table descriptor. A table still referenced by a foreign key
	/// of another table stays.
	pub fn remove_table(&self, id: TableId) -> Result<Option<TableDef>> {
		let mut tables = self.tables.write();
		let Some(position) = tables.iter().position(|t| t.id == id) else {
			return Ok(None);
		};

		if let Some(referencing) =
			tables.iter().find(|t| t.id != id && t.fields.iter().any(|f| f.foreign_table == Some(id)))
		{
			return Err(ForeignDependencyError::TableReferenced {
				table: tables[position].qualified_name(),
				by: referencing.qualified_name(),
			}
			.into());
		}

		let table = tables.remove(position);
		debug!(table = %table.qualified_name(), "table removed");
		Ok(Some(table))
	}

	/// Renames a table in place; its column families keep their names.
	/// Returns `false` when no table is called `old`.
	pub fn rename_table(&self, namespace: &str, old: &str, new: &str) -> Result<bool> {
		let mut tables = self.tables.write();
		if old == new {
			return Ok(tables.iter().any(|t| t.namespace == namespace && t.name == old));
		}
		if tables.iter().any(|t| t.namespace == namespace && t.name == new) {
			return Err(SchemaError::TableAlreadyExists {
				namespace: namespace.to_string(),
				name: new.to_string(),
			}
			.into());
		}

		match tables.iter_mut().find(|t| t.namespace == namespace && t.name == old) {
			Some(table) => {
				table.name = new.to_string();
				debug!(namespace, old, new, "table renamed");
				Ok(true)
			}
			None => Ok(false),
		}
	}
}
