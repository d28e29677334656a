// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	EncodedKey, Record, Result, SchemaError, SortDirection,
	interface::catalog::{FieldId, IndexKind, TableDef},
	key::RangeIndexKey,
};
use tessera_store::{Direction, Snapshot, StoreCursor, StoreRead};
use tessera_type::Value;
use tracing::instrument;

use crate::execute::query::{
	Projection, RangeFilter, Scan, corrupted_key,
	filter::{not_found_index, resolve_equals, resolve_value},
	find_index, hash_equals, load_candidate,
	reader::RecordReader,
};

/// Begin-ordered sweep over one equality group of a range index, yielding
/// stored intervals that overlap the query window.
///
/// Ascending walks forward from the group start until a stored interval
/// begins past the window. Descending starts at the last interval beginning
/// inside the window and walks back to the group start. In both directions
/// an entry qualifies once its stored end reaches the window.
pub(crate) struct RangeScan {
	snapshot: Snapshot,
	reader: RecordReader,
	projection: Projection,
	cursor: StoreCursor,
	prefix: EncodedKey,
	start: EncodedKey,
	begin: u64,
	end: u64,
	direction: Direction,
	verify: Vec<(FieldId, Option<Value>)>,
	started: bool,
}

impl RangeScan {
	#[instrument(name = "query::range::open", level = "trace", skip_all, fields(table = %table.qualified_name()))]
	pub(crate) fn open(snapshot: Snapshot, table: TableDef, filter: &RangeFilter, projection: Projection) -> Result<Self> {
		let equals = resolve_equals(&table, &filter.equals)?;
		let begin_field = resolve_value(&table, &filter.begin_field, &filter.begin)?;
		let end_field = resolve_value(&table, &filter.end_field, &filter.end)?;
		if !filter.begin.get_type().is_orderable() || !filter.end.get_type().is_orderable() {
			return Err(SchemaError::InvalidFilter(format!(
				"fields `{}` and `{}` are not orderable",
				filter.begin_field, filter.end_field
			))
			.into());
		}

		let begin = filter.begin.to_ordered()?;
		let end = filter.end.to_ordered()?;
		if begin > end {
			return Err(SchemaError::InvalidFilter(format!(
				"window [{}, {}] begins after it ends",
				filter.begin, filter.end
			))
			.into());
		}

		let hashed: Vec<FieldId> = equals.iter().map(|(id, _)| *id).collect();
		let index = find_index(&table, |kind| {
			matches!(
				kind,
				IndexKind::Range { hashed: h, begin, end } if *h == hashed && *begin == begin_field && *end == end_field
			)
		})
		.ok_or_else(|| {
			not_found_index(
				&table,
				filter.equals
					.iter()
					.map(|(name, _)| name.clone())
					.chain([filter.begin_field.clone(), filter.end_field.clone()]),
			)
		})?
		.id;

		let (hashes, verify) = hash_equals(equals);
		let prefix = RangeIndexKey::prefix(index, &hashes);
		let (start, direction) = match filter.direction {
			SortDirection::Asc => (prefix.clone(), Direction::Forward),
			SortDirection::Desc => (RangeIndexKey::right_border(index, &hashes, end), Direction::Backward),
		};

		let cursor = snapshot.cursor(&table.index_column_family())?;
		let reader = RecordReader::new(table, projection.loading(verify.iter().map(|(field, _)| *field)));
		Ok(Self {
			snapshot,
			reader,
			projection,
			cursor,
			prefix,
			start,
			begin,
			end,
			direction,
			verify,
			started: false,
		})
	}
}

impl Scan for RangeScan {
	fn advance(&mut self) -> Result<Option<Record>> {
		loop {
			let entry = if self.started {
				self.cursor.step(self.direction)
			} else {
				self.started = true;
				match self.direction {
					Direction::Forward => self.cursor.seek(&self.start),
					Direction::Backward => self.cursor.seek_reverse(&self.start),
				}
			};
			let Some(entry) = entry else {
				return Ok(None);
			};
			if !entry.key.starts_with(self.prefix.as_slice()) {
				return Ok(None);
			}

			let column_family = self.cursor.column_family();
			let stored = RangeIndexKey::decode(&entry.key, &entry.value)
				.filter(|_| entry.key.len() == self.prefix.len() + 16)
				.ok_or_else(|| corrupted_key(column_family, &entry.key))?;
			if stored.begin > self.end {
				// only reachable going forward
				return Ok(None);
			}
			if stored.end < self.begin {
				continue;
			}

			let candidate = load_candidate(
				&self.snapshot,
				&self.reader,
				column_family,
				stored.id,
				&self.verify,
				&self.projection,
			)?;
			if let Some(record) = candidate {
				return Ok(Some(record));
			}
		}
	}

	fn close(&mut self) {
		self.cursor.close();
	}
}
