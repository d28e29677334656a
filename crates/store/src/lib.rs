// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Ordered key-value store behind the engine.
//!
//! Data is split into named column families of byte keys kept in order. Reads
//! go through a [`Snapshot`], a consistent view as of its creation, and writes
//! are batched in a [`Transaction`] and applied atomically on commit. The
//! in-memory backend shares column families copy-on-write, so snapshots are
//! cheap and a commit copies a column family only while a snapshot still
//! references it.

pub use cursor::{Direction, Entry, StoreCursor};
pub use memory::Memory;
pub use snapshot::Snapshot;
pub use transaction::Transaction;

mod cursor;
mod memory;
mod snapshot;
mod transaction;

pub use tessera_core::Result;

/// Read access shared by the store itself, snapshots and transactions.
pub trait StoreRead {
	fn get(&self, column_family: &str, key: &[u8]) -> Result<Option<Vec<u8>>>;

	/// Opens a cursor over a consistent view of one column family.
	fn cursor(&self, column_family: &str) -> Result<StoreCursor>;

	/// An owned view of everything visible to this reader.
	fn snapshot(&self) -> Snapshot;

	fn contains_column_family(&self, column_family: &str) -> bool;
}
