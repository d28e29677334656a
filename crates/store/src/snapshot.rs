// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::BTreeMap, sync::Arc};

use tessera_core::{Error, Result};

use crate::{
	StoreCursor, StoreRead,
	memory::Family,
	transaction::{Lookup, PendingFamily},
};

/// A consistent, owned view of the store, optionally overlaid with the
/// uncommitted writes of a transaction.
#[derive(Clone)]
pub struct Snapshot {
	families: BTreeMap<String, Family>,
	pending: BTreeMap<String, Arc<PendingFamily>>,
}

impl Snapshot {
	pub(crate) fn new(families: BTreeMap<String, Family>, pending: BTreeMap<String, Arc<PendingFamily>>) -> Self {
		Self {
			families,
			pending,
		}
	}

	fn family(&self, column_family: &str) -> Result<Family> {
		match self.families.get(column_family) {
			Some(family) => Ok(family.clone()),
			None if self.pending.contains_key(column_family) => Ok(Family::default()),
			None => Err(Error::ColumnFamilyNotFound(column_family.to_string())),
		}
	}
}

impl StoreRead for Snapshot {
	fn get(&self, column_family: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
		let family = self.family(column_family)?;
		if let Some(pending) = self.pending.get(column_family) {
			match pending.lookup(key) {
				Lookup::Written(value) => return Ok(Some(value.clone())),
				Lookup::Deleted => return Ok(None),
				Lookup::Untouched => {}
			}
		}
		Ok(family.get(key).cloned())
	}

	fn cursor(&self, column_family: &str) -> Result<StoreCursor> {
		let family = self.family(column_family)?;
		Ok(StoreCursor::new(column_family, family, self.pending.get(column_family).cloned()))
	}

	fn snapshot(&self) -> Snapshot {
		self.clone()
	}

	fn contains_column_family(&self, column_family: &str) -> bool {
		self.families.contains_key(column_family) || self.pending.contains_key(column_family)
	}
}
