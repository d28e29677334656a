// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_catalog::{Catalog, FieldToCreate, IndexAddition, IndexToCreate, SequenceRegistry};
use tessera_core::{
	DatabaseConfig, Result, SchemaError,
	interface::catalog::{FieldDef, IndexDef, TableDef, TableId},
};
use tessera_store::Memory;
use tracing::{debug, instrument};

use crate::index::build_index;

mod field;
mod index;
mod integrity;
mod table;

/// Owner of the table catalog and the sequences. Every definition change goes
/// through here: the descriptor is updated, the store is brought in line and
/// the catalog document is written.
///
/// Operations are not atomic across these steps. A failure half way can leave
/// the catalog, the persisted document and the column families disagreeing;
/// [`Schema::check_integrity`] finds such damage.
pub struct Schema {
	catalog: Catalog,
	sequences: SequenceRegistry,
}

impl Schema {
	pub fn exists(store: &Memory, config: &DatabaseConfig) -> bool {
		Catalog::exists(store, config)
	}

	#[instrument(name = "schema::create", level = "debug", skip_all)]
	pub fn create(store: Memory, config: DatabaseConfig) -> Result<Self> {
		let sequences = SequenceRegistry::new(store.clone(), &config);
		let catalog = Catalog::create(store, config)?;
		sequences.ensure_column_family()?;
		Ok(Self {
			catalog,
			sequences,
		})
	}

	#[instrument(name = "schema::open", level = "debug", skip_all)]
	pub fn open(store: Memory, config: DatabaseConfig) -> Result<Self> {
		let sequences = SequenceRegistry::new(store.clone(), &config);
		let catalog = Catalog::open(store, config)?;
		sequences.ensure_column_family()?;
		debug!(tables = catalog.tables().len(), "schema opened");
		Ok(Self {
			catalog,
			sequences,
		})
	}

	pub fn store(&self) -> &Memory {
		self.catalog.store()
	}

	pub fn config(&self) -> &DatabaseConfig {
		self.catalog.config()
	}

	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	pub fn sequences(&self) -> &SequenceRegistry {
		&self.sequences
	}

	pub fn tables(&self) -> Vec<TableDef> {
		self.catalog.tables()
	}

	pub fn table(&self, name: &str, namespace: &str) -> Option<TableDef> {
		self.catalog.table(namespace, name)
	}

	pub fn get_table(&self, name: &str, namespace: &str) -> Result<TableDef> {
		self.catalog.get_table(namespace, name)
	}

	/// Resolves the table a record belongs to.
	pub fn get_table_by_id(&self, id: TableId) -> Result<TableDef> {
		self.catalog
			.table_by_id(id)
			.ok_or_else(|| SchemaError::Inconsistent(format!("table {id} is not in the catalog")).into())
	}

	/// Declares a field. A foreign key field also gets its implicit hash
	/// index, built over the records already stored.
	fn add_field(&self, table: TableId, field: &FieldToCreate) -> Result<FieldDef> {
		let def = self.catalog.add_field(table, field)?;
		if def.is_foreign_key() {
			self.add_index(
				table,
				&IndexToCreate::Hash {
					fields: vec![def.name.clone()],
				},
			)?;
		}
		Ok(def)
	}

	/// Declares an index and builds it. An index whose build fails is taken
	/// out of the catalog again.
	fn add_index(&self, table: TableId, index: &IndexToCreate) -> Result<IndexDef> {
		match self.catalog.add_index(table, index)? {
			IndexAddition::Added(def) => {
				let table = self.get_table_by_id(table)?;
				if let Err(err) = build_index(self.store(), &table, &def) {
					self.catalog.remove_index(table.id, &def.kind)?;
					return Err(err);
				}
				Ok(def)
			}
			IndexAddition::ForeignKeyIndex(def) => Ok(def),
		}
	}
}
