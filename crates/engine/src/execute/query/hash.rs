// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	EncodableKey, KeyPattern, Record, Result, SchemaError,
	interface::catalog::{FieldId, IndexKind, TableDef},
	key::HashIndexKey,
};
use tessera_store::{Snapshot, StoreCursor, StoreRead};
use tessera_type::Value;
use tracing::instrument;

use crate::execute::query::{
	HashFilter, Projection, Scan, corrupted_key,
	filter::{not_found_index, resolve_equals},
	find_index, hash_equals, load_candidate,
	reader::RecordReader,
};

/// Equality lookup through the hash index covering exactly the filtered
/// fields.
pub(crate) struct HashScan {
	snapshot: Snapshot,
	reader: RecordReader,
	projection: Projection,
	cursor: StoreCursor,
	pattern: KeyPattern,
	verify: Vec<(FieldId, Option<Value>)>,
	started: bool,
}

impl HashScan {
	#[instrument(name = "query::hash::open", level = "trace", skip_all, fields(table = %table.qualified_name()))]
	pub(crate) fn open(snapshot: Snapshot, table: TableDef, filter: &HashFilter, projection: Projection) -> Result<Self> {
		let equals = resolve_equals(&table, &filter.equals)?;
		if equals.is_empty() {
			return Err(SchemaError::InvalidFilter("hash filter names no field".to_string()).into());
		}

		let fields: Vec<FieldId> = equals.iter().map(|(id, _)| *id).collect();
		let index = find_index(&table, |kind| {
			matches!(kind, IndexKind::Hash { fields: indexed } if *indexed == fields)
		})
		.ok_or_else(|| not_found_index(&table, filter.equals.iter().map(|(name, _)| name.clone())))?
		.id;

		let (hashes, verify) = hash_equals(equals);
		let cursor = snapshot.cursor(&table.index_column_family())?;
		let reader = RecordReader::new(table, projection.loading(verify.iter().map(|(field, _)| *field)));
		Ok(Self {
			snapshot,
			reader,
			projection,
			cursor,
			pattern: KeyPattern::new(HashIndexKey::prefix(index, &hashes).0),
			verify,
			started: false,
		})
	}
}

impl Scan for HashScan {
	fn advance(&mut self) -> Result<Option<Record>> {
		// skips bucket collisions
		loop {
			let entry = if self.started {
				self.cursor.next_matching(&self.pattern)
			} else {
				self.started = true;
				self.cursor.seek_pattern(&self.pattern)
			};
			let Some(entry) = entry else {
				return Ok(None);
			};

			let column_family = self.cursor.column_family();
			let key = HashIndexKey::decode(&entry.key).ok_or_else(|| corrupted_key(column_family, &entry.key))?;
			let candidate =
				load_candidate(&self.snapshot, &self.reader, column_family, key.id, &self.verify, &self.projection)?;
			if let Some(record) = candidate {
				return Ok(Some(record));
			}
		}
	}

	fn close(&mut self) {
		self.cursor.close();
	}
}
