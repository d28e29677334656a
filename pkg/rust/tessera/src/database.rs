// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Deref;

use tessera_catalog::TableToCreate;
use tessera_core::Result;
use tessera_engine::Engine;
use tracing::debug;

/// An open database. Dereferences to the [`Engine`] for transactions,
/// queries and schema changes; clones share the same store.
#[derive(Clone)]
pub struct Database {
	engine: Engine,
}

impl Database {
	pub(crate) fn new(engine: Engine) -> Self {
		Self {
			engine,
		}
	}

	pub fn engine(&self) -> &Engine {
		&self.engine
	}

	/// Creates `table` unless a table of that name exists. Returns whether it
	/// was created.
	pub fn ensure_table(&self, table: TableToCreate) -> Result<bool> {
		if self.engine.schema().table(&table.name, &table.namespace).is_some() {
			debug!(namespace = %table.namespace, name = %table.name, "table exists");
			return Ok(false);
		}
		self.engine.schema().create_table(table)?;
		Ok(true)
	}
}

impl Deref for Database {
	type Target = Engine;

	fn deref(&self) -> &Self::Target {
		&self.engine
	}
}
