// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Embedded record database over an ordered key-value store.
//!
//! ```ignore
//! let db = tessera::embedded::memory().with_table(files).build()?;
//! db.execute_transactional(|txn| {
//!     let mut file = txn.create("file", "app")?;
//!     file.set(FieldId(1), "notes.txt");
//!     txn.save(&file)
//! })?;
//! let found = db.select("file", "app", HashFilter::new().with("name", "notes.txt"))?;
//! ```

mod builder;
mod database;

pub use builder::EmbeddedBuilder;
pub use database::Database;
pub use tessera_catalog::{FieldToCreate, IndexToCreate, TableToCreate};
pub use tessera_core::{
	DatabaseConfig, Error, Record, Result, SortDirection,
	interface::catalog::{FieldId, RecordId, TableDef},
};
pub use tessera_engine::{
	CommandTransaction, Filter, HashFilter, IdFilter, IntervalFilter, PrefixFilter, Query, RangeFilter,
	RecordCursor, Schema,
};
pub use tessera_store::Memory;
pub use tessera_type::{Type, Value};

pub use tessera_catalog as catalog;
pub use tessera_core as core;
pub use tessera_engine as engine;
pub use tessera_store as store;

pub mod embedded {
	use tessera_store::Memory;

	use crate::EmbeddedBuilder;

	/// A database over a fresh in-memory store.
	pub fn memory() -> EmbeddedBuilder {
		EmbeddedBuilder::new(Memory::new())
	}

	/// A database over an existing store, reopening the schema kept in it.
	pub fn open(store: Memory) -> EmbeddedBuilder {
		EmbeddedBuilder::new(store)
	}
}
