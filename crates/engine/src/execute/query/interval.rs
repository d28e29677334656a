// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	EncodedKey, Record, Result, SchemaError, SortDirection,
	interface::catalog::{FieldId, IndexKind, TableDef},
	key::IntervalIndexKey,
};
use tessera_store::{Direction, Snapshot, StoreCursor, StoreRead};
use tessera_type::Value;
use tracing::instrument;

use crate::execute::query::{
	IntervalFilter, Projection, Scan, corrupted_key,
	filter::{not_found_index, resolve_equals, resolve_value},
	find_index, hash_equals, load_candidate,
	reader::RecordReader,
};

/// Ordered walk over one equality group of an interval index, restricted to
/// indexed values within `[begin, end]`.
pub(crate) struct IntervalScan {
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

impl IntervalScan {
	#[instrument(name = "query::interval::open", level = "trace", skip_all, fields(table = %table.qualified_name()))]
	pub(crate) fn open(
		snapshot: Snapshot,
		table: TableDef,
		filter: &IntervalFilter,
		projection: Projection,
	) -> Result<Self> {
		let equals = resolve_equals(&table, &filter.equals)?;
		let field = resolve_value(&table, &filter.field, &filter.begin)?;
		resolve_value(&table, &filter.field, &filter.end)?;
		if !filter.begin.get_type().is_orderable() {
			return Err(SchemaError::InvalidFilter(format!("field `{}` is not orderable", filter.field)).into());
		}

		let begin = filter.begin.to_ordered()?;
		let end = filter.end.to_ordered()?;
		if begin > end {
			return Err(SchemaError::InvalidFilter(format!(
				"interval [{}, {}] begins after it ends",
				filter.begin, filter.end
			))
			.into());
		}

		let hashed: Vec<FieldId> = equals.iter().map(|(id, _)| *id).collect();
		let index = find_index(&table, |kind| {
			matches!(kind, IndexKind::Interval { hashed: h, indexed } if *h == hashed && *indexed == field)
		})
		.ok_or_else(|| {
			not_found_index(
				&table,
				filter.equals.iter().map(|(name, _)| name.clone()).chain([filter.field.clone()]),
			)
		})?
		.id;

		let (hashes, verify) = hash_equals(equals);
		let (start, direction) = match filter.direction {
			SortDirection::Asc => (IntervalIndexKey::left_border(index, &hashes, begin), Direction::Forward),
			SortDirection::Desc => (IntervalIndexKey::right_border(index, &hashes, end), Direction::Backward),
		};

		let cursor = snapshot.cursor(&table.index_column_family())?;
		let reader = RecordReader::new(table, projection.loading(verify.iter().map(|(field, _)| *field)));
		Ok(Self {
			snapshot,
			reader,
			projection,
			cursor,
			prefix: IntervalIndexKey::prefix(index, &hashes),
			start,
			begin,
			end,
			direction,
			verify,
			started: false,
		})
	}
}

impl Scan for IntervalScan {
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
			if entry.key.len() != self.prefix.len() + 16 {
				return Err(corrupted_key(column_family, &entry.key));
			}
			let (Some(value), Some(id)) = (IntervalIndexKey::value_of(&entry.key), IntervalIndexKey::id_of(&entry.key))
			else {
				return Err(corrupted_key(column_family, &entry.key));
			};
			if value < self.begin || value > self.end {
				return Ok(None);
			}

			let candidate =
				load_candidate(&self.snapshot, &self.reader, column_family, id, &self.verify, &self.projection)?;
			if let Some(record) = candidate {
				return Ok(Some(record));
			}
		}
	}

	fn close(&mut self) {
		self.cursor.close();
	}
}
