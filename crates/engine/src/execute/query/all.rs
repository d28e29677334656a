// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	EncodableKey, Record, Result,
	interface::catalog::{RecordId, TableDef},
	key::RecordKey,
};
use tessera_store::{Entry, Snapshot, StoreCursor, StoreRead};

use crate::execute::query::{Projection, Scan, corrupted_key, reader::RecordReader};

/// Walks the record store in id order, one run per record.
pub(crate) struct RecordScan {
	reader: RecordReader,
	projection: Projection,
	cursor: StoreCursor,
	from: Option<RecordId>,
	until: Option<RecordId>,
	started: bool,
	lookahead: Option<Entry>,
}

impl RecordScan {
	pub(crate) fn open(snapshot: &Snapshot, table: TableDef, projection: Projection) -> Result<Self> {
		Self::bounded(snapshot, table, projection, None, None)
	}

	/// Restricts the walk to ids in `[from, until]`.
	pub(crate) fn bounded(
		snapshot: &Snapshot,
		table: TableDef,
		projection: Projection,
		from: Option<RecordId>,
		until: Option<RecordId>,
	) -> Result<Self> {
		let cursor = snapshot.cursor(&table.data_column_family())?;
		Ok(Self {
			reader: RecordReader::new(table, projection.requested()),
			projection,
			cursor,
			from,
			until,
			started: false,
			lookahead: None,
		})
	}

	fn first(&mut self) -> Option<Entry> {
		match self.from {
			Some(from) => self.cursor.seek(&RecordKey::record_prefix(from)),
			None => self.cursor.seek(&[]),
		}
	}
}

impl Scan for RecordScan {
	fn advance(&mut self) -> Result<Option<Record>> {
		let first = if self.started {
			self.lookahead.take()
		} else {
			self.started = true;
			self.first()
		};
		let Some(first) = first else {
			return Ok(None);
		};

		if let Some(until) = self.until {
			let key = RecordKey::decode(&first.key)
				.ok_or_else(|| corrupted_key(self.cursor.column_family(), &first.key))?;
			if key.id() > until {
				return Ok(None);
			}
		}

		let (mut record, next) = self.reader.read_run(&mut self.cursor, first)?;
		self.lookahead = next;
		self.projection.apply(&mut record);
		Ok(Some(record))
	}

	fn close(&mut self) {
		self.cursor.close();
		self.lookahead = None;
	}
}
