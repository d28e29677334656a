// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Cursors answering queries from indexes and the record store.
//!
//! Every cursor runs over one [`Snapshot`], either committed state or a
//! transaction's view including its pending writes. Index cursors resolve the
//! ids they find against the record store of the same snapshot and verify
//! hash components that may collide before yielding a record.

use std::collections::BTreeSet;

use tessera_core::{
	CorruptionError, Error, Record, Result,
	hash::hash_value,
	interface::catalog::{FieldId, IndexDef, IndexKind, RecordId, TableDef},
};
use tessera_store::Snapshot;
use tessera_type::Value;

pub use filter::{Filter, HashFilter, IdFilter, IntervalFilter, PrefixFilter, Query, RangeFilter};

mod all;
mod filter;
mod hash;
mod id;
mod interval;
mod prefix;
mod range;
pub(crate) mod reader;

pub(crate) use all::RecordScan;
pub(crate) use id::get_by_id;
use reader::RecordReader;

/// One-shot, forward-only sequence of records.
///
/// Cursors close themselves once exhausted, after an error and on drop.
pub trait RecordCursor: Iterator<Item = Result<Record>> {
	/// Whether another record follows.
	///
	/// Cursors load records lazily: when no record is cached this reads the
	/// next one from the store and keeps it for [`next_record`]. Repeated
	/// calls read nothing further and never consume the record.
	///
	/// [`next_record`]: RecordCursor::next_record
	fn has_next(&mut self) -> Result<bool>;

	/// The next record; [`Error::NoElement`] once the cursor is exhausted.
	fn next_record(&mut self) -> Result<Record>;

	/// Releases the underlying scan. Calling it again has no effect.
	fn close(&mut self);

	fn is_closed(&self) -> bool;
}

/// Source of candidate records behind a [`Cursor`].
pub(crate) trait Scan {
	/// The next qualifying record, `None` when the scan is exhausted.
	fn advance(&mut self) -> Result<Option<Record>>;

	fn close(&mut self);
}

pub(crate) struct Cursor<S: Scan> {
	scan: S,
	peeked: Option<Record>,
	closed: bool,
}

impl<S: Scan> Cursor<S> {
	pub(crate) fn new(scan: S) -> Self {
		Self {
			scan,
			peeked: None,
			closed: false,
		}
	}
}

impl<S: Scan> RecordCursor for Cursor<S> {
	// advances the scan at most once per record; the result stays in `peeked`
	fn has_next(&mut self) -> Result<bool> {
		if self.peeked.is_some() {
			return Ok(true);
		}
		if self.closed {
			return Ok(false);
		}

		match self.scan.advance() {
			Ok(Some(record)) => {
				self.peeked = Some(record);
				Ok(true)
			}
			Ok(None) => {
				self.close();
				Ok(false)
			}
			Err(err) => {
				self.close();
				Err(err)
			}
		}
	}

	fn next_record(&mut self) -> Result<Record> {
		self.has_next()?;
		self.peeked.take().ok_or(Error::NoElement)
	}

	fn close(&mut self) {
		if !self.closed {
			self.scan.close();
			self.closed = true;
		}
		self.peeked = None;
	}

	fn is_closed(&self) -> bool {
		self.closed && self.peeked.is_none()
	}
}

impl<S: Scan> Iterator for Cursor<S> {
	type Item = Result<Record>;

	fn next(&mut self) -> Option<Self::Item> {
		match self.has_next() {
			Ok(true) => Some(self.next_record()),
			Ok(false) => None,
			Err(err) => Some(Err(err)),
		}
	}
}

impl<S: Scan> Drop for Cursor<S> {
	fn drop(&mut self) {
		self.close();
	}
}

/// Fields requested by the caller. Cursors may load more to verify
/// candidates and strip the extra fields before yielding.
#[derive(Debug, Clone, Default)]
pub(crate) struct Projection {
	requested: Option<BTreeSet<FieldId>>,
}

impl Projection {
	pub(crate) fn new(requested: Option<BTreeSet<FieldId>>) -> Self {
		Self {
			requested,
		}
	}

	pub(crate) fn requested(&self) -> Option<BTreeSet<FieldId>> {
		self.requested.clone()
	}

	/// Fields to load when `extra` are needed besides the requested ones.
	pub(crate) fn loading(&self, extra: impl IntoIterator<Item = FieldId>) -> Option<BTreeSet<FieldId>> {
		self.requested.as_ref().map(|requested| {
			let mut fields = requested.clone();
			fields.extend(extra);
			fields
		})
	}

	pub(crate) fn apply(&self, record: &mut Record) {
		if let Some(requested) = &self.requested {
			record.retain(|field| requested.contains(&field));
		}
	}
}

/// Opens the cursor answering `query` over `snapshot`.
pub(crate) fn open_cursor(snapshot: Snapshot, table: TableDef, query: &Query) -> Result<Box<dyn RecordCursor>> {
	let projection = Projection::new(filter::resolve_projection(&table, query.fields.as_deref())?);
	let cursor: Box<dyn RecordCursor> = match &query.filter {
		Filter::All => Box::new(Cursor::new(RecordScan::open(&snapshot, table, projection)?)),
		Filter::Hash(filter) => Box::new(Cursor::new(hash::HashScan::open(snapshot, table, filter, projection)?)),
		Filter::Prefix(filter) => {
			Box::new(Cursor::new(prefix::PrefixScan::open(snapshot, table, filter, projection)?))
		}
		Filter::Interval(filter) => {
			Box::new(Cursor::new(interval::IntervalScan::open(snapshot, table, filter, projection)?))
		}
		Filter::Range(filter) => Box::new(Cursor::new(range::RangeScan::open(snapshot, table, filter, projection)?)),
		Filter::Id(filter) => Box::new(Cursor::new(id::open(&snapshot, table, filter, projection)?)),
	};
	Ok(cursor)
}

/// Whether the record holds every expected value; `None` expects the field
/// to be null.
pub(crate) fn matches_equals(record: &Record, expected: &[(FieldId, Option<Value>)]) -> bool {
	expected.iter().all(|(field, value)| record.get(*field) == value.as_ref())
}

/// Hash components of equality constraints, plus the constraints whose
/// component may collide and must be checked against the record.
pub(crate) fn hash_equals(equals: Vec<(FieldId, Option<Value>)>) -> (Vec<u64>, Vec<(FieldId, Option<Value>)>) {
	let mut hashes = Vec::with_capacity(equals.len());
	let mut verify = Vec::new();
	for (field, value) in equals {
		let component = hash_value(value.as_ref());
		hashes.push(component.value);
		if !component.exact {
			verify.push((field, value));
		}
	}
	(hashes, verify)
}

/// Loads the record an index entry points at. `None` when the record fails
/// verification of an inexact hash component.
pub(crate) fn load_candidate(
	snapshot: &Snapshot,
	reader: &RecordReader,
	column_family: &str,
	id: RecordId,
	verify: &[(FieldId, Option<Value>)],
	projection: &Projection,
) -> Result<Option<Record>> {
	let mut record = reader.get(snapshot, id)?.ok_or_else(|| dangling(column_family, id))?;
	if !matches_equals(&record, verify) {
		return Ok(None);
	}
	projection.apply(&mut record);
	Ok(Some(record))
}

/// The index of `table` whose shape satisfies `accept`.
pub(crate) fn find_index<'a>(table: &'a TableDef, accept: impl Fn(&IndexKind) -> bool) -> Option<&'a IndexDef> {
	table.indexes.iter().find(|index| accept(&index.kind))
}

pub(crate) fn corrupted_key(column_family: &str, key: &[u8]) -> Error {
	CorruptionError::KeyCorrupted {
		column_family: column_family.to_string(),
		key: key.to_vec(),
	}
	.into()
}

pub(crate) fn dangling(column_family: &str, id: RecordId) -> Error {
	CorruptionError::DanglingIndexEntry {
		column_family: column_family.to_string(),
		id: id.0,
	}
	.into()
}
