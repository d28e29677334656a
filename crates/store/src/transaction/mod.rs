// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::BTreeMap, sync::Arc};

use tessera_core::{EncodedKey, Error, Result};
use tracing::{instrument, trace};

pub(crate) use pending::{Lookup, PendingFamily};

use crate::{Memory, Snapshot, StoreCursor, StoreRead, memory::Family};

mod pending;

/// A batch of writes applied atomically on [`Transaction::commit`].
///
/// Reads see the store as of [`Memory::begin`] plus the transaction's own
/// writes. Dropping a transaction without committing abandons it. Concurrent
/// transactions are not checked for conflicts; the last commit wins.
pub struct Transaction {
	store: Memory,
	base: BTreeMap<String, Family>,
	pending: BTreeMap<String, Arc<PendingFamily>>,
	committed: bool,
}

impl Transaction {
	pub(crate) fn new(store: Memory, base: BTreeMap<String, Family>) -> Self {
		Self {
			store,
			base,
			pending: BTreeMap::new(),
			committed: false,
		}
	}

	fn pending_mut(&mut self, column_family: &str) -> Result<&mut PendingFamily> {
		if !self.store.contains_column_family(column_family) {
			return Err(Error::ColumnFamilyNotFound(column_family.to_string()));
		}
		let pending = self.pending.entry(column_family.to_string()).or_default();
		Ok(Arc::make_mut(pending))
	}

	pub fn put(&mut self, column_family: &str, key: EncodedKey, value: Vec<u8>) -> Result<()> {
		self.pending_mut(column_family)?.put(key, value);
		Ok(())
	}

	pub fn single_delete(&mut self, column_family: &str, key: EncodedKey) -> Result<()> {
		self.pending_mut(column_family)?.delete(key);
		Ok(())
	}

	/// Deletes every key in `[begin, end)`.
	pub fn delete_range(&mut self, column_family: &str, begin: EncodedKey, end: EncodedKey) -> Result<()> {
		self.pending_mut(column_family)?.delete_range(begin, end);
		Ok(())
	}

	pub fn is_empty(&self) -> bool {
		self.pending.values().all(|p| p.is_empty())
	}

	#[instrument(name = "store::transaction::commit", level = "trace", skip(self))]
	pub fn commit(mut self) -> Result<()> {
		self.committed = true;
		if self.is_empty() {
			return Ok(());
		}
		self.store.apply(&self.pending)
	}

	/// Discards every pending write.
	pub fn rollback(self) {}
}

impl StoreRead for Transaction {
	fn get(&self, column_family: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
		self.snapshot().get(column_family, key)
	}

	fn cursor(&self, column_family: &str) -> Result<StoreCursor> {
		self.snapshot().cursor(column_family)
	}

	fn snapshot(&self) -> Snapshot {
		Snapshot::new(self.base.clone(), self.pending.clone())
	}

	fn contains_column_family(&self, column_family: &str) -> bool {
		self.base.contains_key(column_family) || self.pending.contains_key(column_family)
	}
}

impl Drop for Transaction {
	fn drop(&mut self) {
		if !self.committed && !self.is_empty() {
			trace!(column_families = self.pending.len(), "transaction abandoned");
		}
	}
}
