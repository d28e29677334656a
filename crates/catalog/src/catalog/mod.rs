// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use parking_lot::RwLock;
use tessera_core::{
	DatabaseConfig, Result, SchemaError,
	interface::catalog::{IndexDef, TableDef, TableId},
};
use tessera_store::Memory;
use tracing::{debug, instrument};

use crate::CatalogStore;

mod field;
mod index;
mod integrity;
mod table;

/// Outcome of adding an index to a table.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexAddition {
	/// A new index was declared; it still has to be built.
	Added(IndexDef),
	/// The index is the implicit hash index of a foreign key, which already
	/// exists and is kept up to date.
	ForeignKeyIndex(IndexDef),
}

/// The materialized catalog: every table descriptor, held in memory and
/// mirrored by the persisted schema document.
///
/// Definition changes only touch memory. Callers persist them with
/// [`Catalog::save`] once the matching store actions are done.
pub struct Catalog {
	store: Memory,
	config: DatabaseConfig,
	tables: RwLock<Vec<TableDef>>,
}

impl Catalog {
	pub fn exists(store: &Memory, config: &DatabaseConfig) -> bool {
		CatalogStore::exists(store, config)
	}

	#[instrument(name = "catalog::create", level = "debug", skip_all)]
	pub fn create(store: Memory, config: DatabaseConfig) -> Result<Self> {
		CatalogStore::create(&store, &config)?;
		debug!("catalog created");
		Ok(Self {
			store,
			config,
			tables: RwLock::new(Vec::new()),
		})
	}

	#[instrument(name = "catalog::open", level = "debug", skip_all)]
	pub fn open(store: Memory, config: DatabaseConfig) -> Result<Self> {
		let tables = CatalogStore::load(&store, &config)?;
		Ok(Self {
			store,
			config,
			tables: RwLock::new(tables),
		})
	}

	pub fn config(&self) -> &DatabaseConfig {
		&self.config
	}

	pub fn store(&self) -> &Memory {
		&self.store
	}

	/// Writes the whole catalog document.
	pub fn save(&self) -> Result<()> {
		let tables = self.tables.read();
		CatalogStore::save(&self.store, &self.config, &tables)?;
		debug!(tables = tables.len(), "catalog saved");
		Ok(())
	}

	pub fn tables(&self) -> Vec<TableDef> {
		self.tables.read().clone()
	}

	pub fn table(&self, namespace: &str, name: &str) -> Option<TableDef> {
		self.tables.read().iter().find(|t| t.namespace == namespace && t.name == name).cloned()
	}

	pub fn get_table(&self, namespace: &str, name: &str) -> Result<TableDef> {
		self.table(namespace, name).ok_or_else(|| {
			SchemaError::TableNotFound {
				namespace: namespace.to_string(),
				name: name.to_string(),
			}
			.into()
		})
	}

	pub fn table_by_id(&self, id: TableId) -> Option<TableDef> {
		self.tables.read().iter().find(|t| t.id == id).cloned()
	}

	/// Applies `f` to one table descriptor under the write lock.
	fn with_table_mut<T>(&self, id: TableId, f: impl FnOnce(&mut TableDef) -> Result<T>) -> Result<T> {
		let mut tables = self.tables.write();
		let table = tables
			.iter_mut()
			.find(|t| t.id == id)
			.ok_or_else(|| SchemaError::Inconsistent(format!("table {id} is not in the catalog")))?;
		f(table)
	}
}
