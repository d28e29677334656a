// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use tessera_core::{Error, Result};
use tessera_store::StoreRead;
use tracing::{info, instrument, warn};

use crate::{Schema, index::build_index};

impl Schema {
	/// Verifies the catalog against itself and against the store.
	///
	/// A missing data column family or sequence is reported. A missing index
	/// column family is recreated and every index of the table rebuilt. Column
	/// families no table claims are reported last.
	#[instrument(name = "schema::check_integrity", level = "debug", skip(self))]
	pub fn check_integrity(&self) -> Result<()> {
		self.catalog.check_integrity()?;

		let store = self.store();
		let sequences: HashSet<String> = self.sequences.names()?.into_iter().collect();
		let mut claimed = HashSet::new();

		for table in self.tables() {
			let data_cf = table.data_column_family();
			if !store.contains_column_family(&data_cf) {
				return Err(Error::ColumnFamilyNotFound(data_cf));
			}
			if !sequences.contains(&table.sequence_name()) {
				return Err(Error::SequenceNotFound(table.sequence_name()));
			}

			let index_cf = table.index_column_family();
			if !store.contains_column_family(&index_cf) {
				warn!(table = %table.qualified_name(), "index column family missing, rebuilding");
				store.create_column_family(&index_cf)?;
				for index in &table.indexes {
					build_index(store, &table, index)?;
				}
			}

			claimed.insert(data_cf);
			claimed.insert(index_cf);
		}

		let mut unclaimed: Vec<String> = store
			.column_families()
			.into_iter()
			.filter(|cf| !claimed.contains(cf) && !self.config().is_reserved(cf))
			.collect();
		if !unclaimed.is_empty() {
			unclaimed.sort();
			return Err(Error::InconsistentDatabase(format!(
				"column families not claimed by any table: {}",
				unclaimed.join(", ")
			)));
		}

		info!(tables = claimed.len() / 2, "integrity verified");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use tessera_core::Error;
	use tessera_store::{Entry, StoreRead};

	use crate::test_utils::{file_table, insert_file};

	#[test]
	fn test_healthy_database() {
		let (engine, _) = file_table();
		insert_file(&engine, "a", 1);
		engine.schema().check_integrity().unwrap();
	}

	#[test]
	fn test_missing_data_column_family() {
		let (engine, table) = file_table();
		engine.store().drop_column_family(&table.data_column_family());
		let err = engine.schema().check_integrity().unwrap_err();
		assert!(matches!(err, Error::ColumnFamilyNotFound(cf) if cf == table.data_column_family()));
	}

	#[test]
	fn test_missing_sequence() {
		let (engine, table) = file_table();
		engine.schema().sequences().drop(&table.sequence_name()).unwrap();
		let err = engine.schema().check_integrity().unwrap_err();
		assert!(matches!(err, Error::SequenceNotFound(name) if name == table.sequence_name()));
	}

	#[test]
	fn test_missing_index_column_family_rebuilt() {
		let (engine, table) = file_table();
		for (name, size) in [("Test file", 3), ("other", 1), ("final", 2)] {
			insert_file(&engine, name, size);
		}
		let cf = table.index_column_family();
		let maintained: Vec<Entry> = engine.store().cursor(&cf).unwrap().collect();

		assert!(engine.store().drop_column_family(&cf));
		engine.schema().check_integrity().unwrap();

		let rebuilt: Vec<Entry> = engine.store().cursor(&cf).unwrap().collect();
		assert_eq!(rebuilt, maintained);
	}

	#[test]
	fn test_unclaimed_column_family() {
		let (engine, _) = file_table();
		engine.store().create_column_family("app.t99").unwrap();
		let err = engine.schema().check_integrity().unwrap_err();
		assert!(matches!(err, Error::InconsistentDatabase(message) if message.contains("app.t99")));
	}
}
