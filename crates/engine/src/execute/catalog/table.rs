// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_catalog::TableToCreate;
use tessera_core::{Result, interface::catalog::TableDef};
use tracing::{debug, instrument};

use crate::Schema;

impl Schema {
	/// Provisions the column families and the sequence of a new table, then
	/// declares its fields and indexes.
	#[instrument(name = "schema::create_table", level = "debug", skip_all, fields(namespace = %table.namespace, name = %table.name))]
	pub fn create_table(&self, table: TableToCreate) -> Result<TableDef> {
		let def = self.catalog.new_table(&table.namespace, &table.name)?;
		self.store().create_column_family(&def.data_column_family())?;
		self.store().create_column_family(&def.index_column_family())?;
		self.sequences.create(&def.sequence_name())?;

		for field in &table.fields {
			self.add_field(def.id, field)?;
		}
		for index in &table.indexes {
			self.add_index(def.id, index)?;
		}

		self.catalog.save()?;
		let def = self.get_table_by_id(def.id)?;
		debug!(id = %def.id, fields = def.fields.len(), indexes = def.indexes.len(), "table created");
		Ok(def)
	}

	/// Drops a table with its records, indexes and sequence. Returns `false`
	/// when there is no such table.
	#[instrument(name = "schema::drop_table", level = "debug", skip(self))]
	pub fn drop_table(&self, name: &str, namespace: &str) -> Result<bool> {
		let Some(def) = self.table(name, namespace) else {
			return Ok(false);
		};
		if self.catalog.remove_table(def.id)?.is_none() {
			return Ok(false);
		}

		self.store().drop_column_family(&def.data_column_family());
		self.store().drop_column_family(&def.index_column_family());
		self.sequences.drop(&def.sequence_name())?;
		self.catalog.save()?;
		debug!("table dropped");
		Ok(true)
	}

	/// Returns `false` when there is no table called `old`.
	#[instrument(name = "schema::rename_table", level = "debug", skip(self))]
	pub fn rename_table(&self, old: &str, new: &str, namespace: &str) -> Result<bool> {
		if !self.catalog.rename_table(namespace, old, new)? {
			return Ok(false);
		}
		self.catalog.save()?;
		Ok(true)
	}
}
