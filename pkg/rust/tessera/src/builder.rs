// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_catalog::TableToCreate;
use tessera_core::{DatabaseConfig, Result};
use tessera_engine::Engine;
use tessera_store::Memory;
use tracing::{info, instrument};

use crate::Database;

pub struct EmbeddedBuilder {
	store: Memory,
	config: DatabaseConfig,
	tables: Vec<TableToCreate>,
	check_integrity: bool,
}

impl EmbeddedBuilder {
	pub fn new(store: Memory) -> Self {
		Self {
			store,
			config: DatabaseConfig::default(),
			tables: Vec::new(),
			check_integrity: true,
		}
	}

	pub fn with_config(mut self, config: DatabaseConfig) -> Self {
		self.config = config;
		self
	}

	/// A table the database must have. Tables already present in the store
	/// are left as they are.
	pub fn with_table(mut self, table: TableToCreate) -> Self {
		self.tables.push(table);
		self
	}

	/// Whether to verify (and repair) the store when it is opened. On by
	/// default.
	pub fn with_integrity_check(mut self, enabled: bool) -> Self {
		self.check_integrity = enabled;
		self
	}

	#[instrument(name = "database::build", level = "debug", skip_all)]
	pub fn build(self) -> Result<Database> {
		let database = Database::new(Engine::new(self.store, self.config)?);
		if self.check_integrity {
			database.schema().check_integrity()?;
		}

		let mut created = 0usize;
		for table in self.tables {
			if database.ensure_table(table)? {
				created += 1;
			}
		}

		info!(tables = database.schema().tables().len(), created, "database ready");
		Ok(database)
	}
}
