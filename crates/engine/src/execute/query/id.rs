// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	Record, Result, SchemaError,
	interface::catalog::{RecordId, TableDef},
};
use tessera_store::{Snapshot, StoreRead};

use crate::execute::query::{IdFilter, Projection, RecordScan, reader::RecordReader};

/// Scan of the record store bounded to the inclusive id range of `filter`.
pub(crate) fn open(snapshot: &Snapshot, table: TableDef, filter: &IdFilter, projection: Projection) -> Result<RecordScan> {
	if filter.begin > filter.end {
		return Err(SchemaError::InvalidFilter(format!("id range [{}, {}] begins after it ends", filter.begin, filter.end))
			.into());
	}
	RecordScan::bounded(snapshot, table, projection, Some(filter.begin), Some(filter.end))
}

/// Point lookup; `None` when no record has `id`.
pub(crate) fn get_by_id(reader: &impl StoreRead, table: TableDef, id: RecordId) -> Result<Option<Record>> {
	RecordReader::new(table, None).get(reader, id)
}
