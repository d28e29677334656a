// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use tessera_core::{DatabaseConfig, EncodedKey, Error, Result};
use tessera_store::{Memory, StoreRead};
use tracing::{debug, instrument};

use crate::Sequence;

/// Open sequences by name, all stored in the sequence column family.
pub struct SequenceRegistry {
	store: Memory,
	column_family: String,
	block_size: u64,
	open: RwLock<HashMap<String, Arc<Sequence>>>,
}

impl SequenceRegistry {
	pub fn new(store: Memory, config: &DatabaseConfig) -> Self {
		Self {
			store,
			column_family: config.sequence_column_family.clone(),
			block_size: config.sequence_block_size,
			open: RwLock::new(HashMap::new()),
		}
	}

	/// Creates the sequence column family unless it is already there.
	pub fn ensure_column_family(&self) -> Result<()> {
		if !self.store.contains_column_family(&self.column_family) {
			self.store.create_column_family(&self.column_family)?;
		}
		Ok(())
	}

	/// Starts a sequence at zero. An existing mark under the same name is
	/// overwritten.
	#[instrument(name = "catalog::sequence::create", level = "debug", skip(self))]
	pub fn create(&self, name: &str) -> Result<()> {
		self.open.write().remove(name);
		self.store.put(&self.column_family, EncodedKey::new(name), 0u64.to_be_bytes().to_vec())?;
		debug!("sequence created");
		Ok(())
	}

	/// Returns whether the sequence existed.
	#[instrument(name = "catalog::sequence::drop", level = "debug", skip(self))]
	pub fn drop(&self, name: &str) -> Result<bool> {
		self.open.write().remove(name);
		let key = EncodedKey::new(name);
		if self.store.get(&self.column_family, &key)?.is_none() {
			return Ok(false);
		}
		self.store.single_delete(&self.column_family, key)?;
		debug!("sequence dropped");
		Ok(true)
	}

	pub fn contains(&self, name: &str) -> Result<bool> {
		if !self.store.contains_column_family(&self.column_family) {
			return Ok(false);
		}
		Ok(self.store.get(&self.column_family, &EncodedKey::new(name))?.is_some())
	}

	/// The open sequence called `name`, opening it on first use.
	pub fn get(&self, name: &str) -> Result<Arc<Sequence>> {
		if let Some(sequence) = self.open.read().get(name) {
			return Ok(sequence.clone());
		}

		let mut open = self.open.write();
		if let Some(sequence) = open.get(name) {
			return Ok(sequence.clone());
		}
		if !self.contains(name)? {
			return Err(Error::SequenceNotFound(name.to_string()));
		}

		let sequence = Arc::new(Sequence::open(self.store.clone(), &self.column_family, name, self.block_size)?);
		open.insert(name.to_string(), sequence.clone());
		Ok(sequence)
	}

	/// Names of every persisted sequence.
	pub fn names(&self) -> Result<Vec<String>> {
		if !self.store.contains_column_family(&self.column_family) {
			return Ok(Vec::new());
		}
		let cursor = self.store.cursor(&self.column_family)?;
		Ok(cursor.map(|entry| String::from_utf8_lossy(&entry.key).into_owned()).collect())
	}
}
