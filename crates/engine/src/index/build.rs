// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	Result,
	interface::catalog::{IndexDef, TableDef},
	key::IndexKeyRange,
};
use tessera_store::{Memory, StoreRead};
use tracing::{debug, info, instrument};

use crate::{
	execute::query::{Cursor, Projection, RecordScan},
	index::index_entries,
};

/// Writes every entry of `index` in a single transaction, replacing whatever
/// the index column family held for it. Either the whole index lands or
/// nothing does.
#[instrument(name = "index::build", level = "debug", skip_all, fields(table = %table.qualified_name(), index = %index.id))]
pub(crate) fn build_index(store: &Memory, table: &TableDef, index: &IndexDef) -> Result<usize> {
	let column_family = table.index_column_family();
	let mut txn = store.begin();

	let range = IndexKeyRange::of(index.id);
	txn.delete_range(&column_family, range.start, range.end)?;

	let snapshot = txn.snapshot();
	let projection = Projection::new(Some(index.kind.fields().into_iter().collect()));
	let scan = Cursor::new(RecordScan::open(&snapshot, table.clone(), projection)?);

	let mut records = 0usize;
	let mut entries = 0usize;
	for record in scan {
		let record = record?;
		for entry in index_entries(table, index, &record)? {
			txn.put(&column_family, entry.key, entry.value)?;
			entries += 1;
		}
		records += 1;
		if records % 10_000 == 0 {
			debug!(records, "building");
		}
	}

	txn.commit()?;
	info!(kind = index.kind.name(), records, entries, "index built");
	Ok(entries)
}
