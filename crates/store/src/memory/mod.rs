// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::BTreeMap, sync::Arc};

use parking_lot::RwLock;
use tessera_core::{EncodedKey, Error, Result};
use tracing::{debug, instrument, trace};

use crate::{Snapshot, StoreCursor, StoreRead, Transaction, transaction::PendingFamily};

pub(crate) type Family = Arc<BTreeMap<EncodedKey, Vec<u8>>>;

/// In-memory store. Clones share the same data.
#[derive(Clone, Default)]
pub struct Memory {
	families: Arc<RwLock<BTreeMap<String, Family>>>,
}

impl Memory {
	pub fn new() -> Self {
		Self::default()
	}

	#[instrument(name = "store::column_family::create", level = "debug", skip(self))]
	pub fn create_column_family(&self, name: &str) -> Result<()> {
		let mut families = self.families.write();
		if families.contains_key(name) {
			return Err(Error::ColumnFamilyExists(name.to_string()));
		}
		families.insert(name.to_string(), Family::default());
		debug!("column family created");
		Ok(())
	}

	/// Returns whether the column family existed.
	#[instrument(name = "store::column_family::drop", level = "debug", skip(self))]
	pub fn drop_column_family(&self, name: &str) -> bool {
		let dropped = self.families.write().remove(name).is_some();
		debug!(dropped, "column family dropped");
		dropped
	}

	pub fn column_families(&self) -> Vec<String> {
		self.families.read().keys().cloned().collect()
	}

	pub fn begin(&self) -> Transaction {
		Transaction::new(self.clone(), self.families.read().clone())
	}

	pub fn put(&self, column_family: &str, key: EncodedKey, value: Vec<u8>) -> Result<()> {
		let mut txn = self.begin();
		txn.put(column_family, key, value)?;
		txn.commit()
	}

	pub fn single_delete(&self, column_family: &str, key: EncodedKey) -> Result<()> {
		let mut txn = self.begin();
		txn.single_delete(column_family, key)?;
		txn.commit()
	}

	/// Deletes every key in `[begin, end)`.
	pub fn delete_range(&self, column_family: &str, begin: EncodedKey, end: EncodedKey) -> Result<()> {
		let mut txn = self.begin();
		txn.delete_range(column_family, begin, end)?;
		txn.commit()
	}

	/// Applies a transaction's writes atomically. Fails without applying
	/// anything if one of the touched column families is gone.
	pub(crate) fn apply(&self, pending: &BTreeMap<String, Arc<PendingFamily>>) -> Result<()> {
		let mut families = self.families.write();

		if let Some(missing) = pending.keys().find(|name| !families.contains_key(name.as_str())) {
			return Err(Error::ColumnFamilyNotFound(missing.clone()));
		}

		for (name, writes) in pending {
			let Some(family) = families.get_mut(name) else {
				continue;
			};
			let data = Arc::make_mut(family);
			writes.apply_to(data);
			trace!(column_family = %name, writes = writes.len(), "applied");
		}

		Ok(())
	}
}

impl StoreRead for Memory {
	fn get(&self, column_family: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
		let families = self.families.read();
		let family = families.get(column_family).ok_or_else(|| Error::ColumnFamilyNotFound(column_family.to_string()))?;
		Ok(family.get(key).cloned())
	}

	fn cursor(&self, column_family: &str) -> Result<StoreCursor> {
		self.snapshot().cursor(column_family)
	}

	fn snapshot(&self) -> Snapshot {
		Snapshot::new(self.families.read().clone(), BTreeMap::new())
	}

	fn contains_column_family(&self, column_family: &str) -> bool {
		self.families.read().contains_key(column_family)
	}
}

#[cfg(test)]
mod tests {
	use tessera_core::{EncodedKey, Error};

	use crate::{Memory, StoreRead};

	fn key(b: &[u8]) -> EncodedKey {
		EncodedKey::new(b.to_vec())
	}

	#[test]
	fn test_column_family_lifecycle() {
		let store = Memory::new();
		store.create_column_family("a").unwrap();
		assert!(store.contains_column_family("a"));
		assert!(matches!(store.create_column_family("a"), Err(Error::ColumnFamilyExists(_))));
		assert_eq!(store.column_families(), vec!["a".to_string()]);
		assert!(store.drop_column_family("a"));
		assert!(!store.drop_column_family("a"));
		assert!(!store.contains_column_family("a"));
	}

	#[test]
	fn test_autocommit_writes() {
		let store = Memory::new();
		store.create_column_family("a").unwrap();
		store.put("a", key(b"k1"), b"v1".to_vec()).unwrap();
		store.put("a", key(b"k2"), b"v2".to_vec()).unwrap();
		assert_eq!(store.get("a", b"k1").unwrap(), Some(b"v1".to_vec()));

		store.single_delete("a", key(b"k1")).unwrap();
		assert_eq!(store.get("a", b"k1").unwrap(), None);

		store.delete_range("a", key(b"k"), key(b"l")).unwrap();
		assert_eq!(store.get("a", b"k2").unwrap(), None);
	}

	#[test]
	fn test_missing_column_family() {
		let store = Memory::new();
		assert!(matches!(store.get("missing", b"k"), Err(Error::ColumnFamilyNotFound(_))));
		assert!(matches!(store.put("missing", key(b"k"), vec![]), Err(Error::ColumnFamilyNotFound(_))));
	}

	#[test]
	fn test_clones_share_data() {
		let store = Memory::new();
		let other = store.clone();
		store.create_column_family("a").unwrap();
		store.put("a", key(b"k"), b"v".to_vec()).unwrap();
		assert_eq!(other.get("a", b"k").unwrap(), Some(b"v".to_vec()));
	}

	#[test]
	fn test_snapshot_isolation() {
		let store = Memory::new();
		store.create_column_family("a").unwrap();
		store.put("a", key(b"k"), b"old".to_vec()).unwrap();

		let snapshot = store.snapshot();
		store.put("a", key(b"k"), b"new".to_vec()).unwrap();

		assert_eq!(snapshot.get("a", b"k").unwrap(), Some(b"old".to_vec()));
		assert_eq!(store.get("a", b"k").unwrap(), Some(b"new".to_vec()));
	}
}
