// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use tessera_core::{
	DatabaseConfig, Error, Record, Result,
	interface::catalog::RecordId,
};
use tessera_store::{Memory, StoreRead};
use tracing::{debug, instrument};

use crate::{
	CommandTransaction, Schema,
	execute::query::{Query, RecordCursor, get_by_id, open_cursor},
};

/// Entry point over one store: owns the schema and hands out transactions.
/// Cloning is cheap and shares everything.
pub struct Engine(Arc<EngineInner>);

pub struct EngineInner {
	schema: Schema,
}

impl Engine {
	/// Opens the schema persisted in `store`, or creates an empty one when the
	/// store has none.
	#[instrument(name = "engine::new", level = "debug", skip_all)]
	pub fn new(store: Memory, config: DatabaseConfig) -> Result<Self> {
		let schema = if Schema::exists(&store, &config) {
			Schema::open(store, config)?
		} else {
			debug!("no schema found, creating");
			Schema::create(store, config)?
		};
		Ok(Self(Arc::new(EngineInner {
			schema,
		})))
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn store(&self) -> &Memory {
		self.schema.store()
	}

	pub fn begin(&self) -> CommandTransaction<'_> {
		CommandTransaction::new(&self.schema)
	}

	/// Runs `f` as one unit of work. Its writes are committed when it returns
	/// `Ok`; on any error they are discarded and the error comes back wrapped
	/// in [`Error::Transaction`].
	pub fn execute_transactional<T>(&self, f: impl FnOnce(&mut CommandTransaction<'_>) -> Result<T>) -> Result<T> {
		let mut txn = self.begin();
		let result = f(&mut txn).map_err(Error::transaction)?;
		txn.commit().map_err(Error::transaction)?;
		Ok(result)
	}

	/// Opens a cursor over the committed state of a table.
	pub fn select(&self, table: &str, namespace: &str, query: impl Into<Query>) -> Result<Box<dyn RecordCursor>> {
		let def = self.schema.get_table(table, namespace)?;
		open_cursor(self.store().snapshot(), def, &query.into())
	}

	/// `None` when the table holds no record with `id`.
	pub fn get_by_id(&self, table: &str, namespace: &str, id: RecordId) -> Result<Option<Record>> {
		let def = self.schema.get_table(table, namespace)?;
		get_by_id(&self.store().snapshot(), def, id)
	}
}

impl Clone for Engine {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl Deref for Engine {
	type Target = EngineInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
