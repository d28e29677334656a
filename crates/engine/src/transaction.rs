// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	Record, Result,
	interface::catalog::{RecordId, TableDef},
};
use tessera_store::{StoreRead, Transaction};
use tracing::instrument;

use crate::{
	Schema,
	execute::query::{Query, RecordCursor, get_by_id, open_cursor},
};

/// A unit of work over the record store.
///
/// Reads observe the transaction's own pending writes. Nothing becomes
/// visible to others until [`CommandTransaction::commit`]; dropping the
/// transaction abandons it.
pub struct CommandTransaction<'a> {
	pub(crate) schema: &'a Schema,
	pub(crate) txn: Transaction,
}

impl<'a> CommandTransaction<'a> {
	pub(crate) fn new(schema: &'a Schema) -> Self {
		Self {
			schema,
			txn: schema.store().begin(),
		}
	}

	/// An empty record carrying the next id of the table's sequence. Nothing
	/// is written until the record is saved.
	#[instrument(name = "transaction::create", level = "trace", skip(self))]
	pub fn create(&mut self, table: &str, namespace: &str) -> Result<Record> {
		let def = self.schema.get_table(table, namespace)?;
		let id = self.schema.sequences().get(&def.sequence_name())?.next()?;
		Ok(Record::new(def.id, RecordId(id)))
	}

	pub fn get(&self, table: &str, namespace: &str, id: RecordId) -> Result<Option<Record>> {
		let def = self.schema.get_table(table, namespace)?;
		get_by_id(&self.txn, def, id)
	}

	/// Opens a cursor over the transaction's view of the table.
	pub fn select(&self, table: &str, namespace: &str, query: impl Into<Query>) -> Result<Box<dyn RecordCursor>> {
		let def = self.schema.get_table(table, namespace)?;
		open_cursor(self.txn.snapshot(), def, &query.into())
	}

	pub fn commit(self) -> Result<()> {
		self.txn.commit()
	}

	pub fn rollback(self) {
		self.txn.rollback()
	}

	pub(crate) fn table_of(&self, record: &Record) -> Result<TableDef> {
		self.schema.get_table_by_id(record.table())
	}
}
