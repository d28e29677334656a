// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use tessera_core::{
	EncodableKey, EncodedKey, Error, Record, Result,
	hash::hash_value,
	interface::catalog::{FieldId, IndexDef, IndexKind, TableDef},
	key::{HashIndexKey, IntervalIndexKey, PrefixIndexKey, RangeIndexKey},
	lexeme::lexemes,
};

/// One key/value pair of an index column family.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct IndexEntry {
	pub key: EncodedKey,
	pub value: Vec<u8>,
}

impl IndexEntry {
	fn key_only(key: EncodedKey) -> Self {
		Self {
			key,
			value: Vec::new(),
		}
	}
}

/// Entries `record` contributes to `index`.
///
/// Hash entries exist for every record, null components included. Interval
/// and range entries exist only while the indexed values are present.
pub(crate) fn index_entries(table: &TableDef, index: &IndexDef, record: &Record) -> Result<Vec<IndexEntry>> {
	let hashes = |fields: &[FieldId]| -> Vec<u64> { fields.iter().map(|f| hash_value(record.get(*f)).value).collect() };

	let entries = match &index.kind {
		IndexKind::Hash {
			fields,
		} => vec![IndexEntry::key_only(
			HashIndexKey {
				index: index.id,
				hashes: hashes(fields),
				id: record.id(),
			}
			.encode(),
		)],
		IndexKind::Prefix {
			fields,
		} => {
			let mut text = BTreeSet::new();
			for field in fields {
				if let Some(value) = record.get(*field).and_then(|v| v.as_str()) {
					text.extend(lexemes(value));
				}
			}
			text.into_iter()
				.map(|lexeme| {
					IndexEntry::key_only(
						PrefixIndexKey {
							index: index.id,
							lexeme,
							id: record.id(),
						}
						.encode(),
					)
				})
				.collect()
		}
		IndexKind::Interval {
			hashed,
			indexed,
		} => match record.get(*indexed) {
			Some(value) => vec![IndexEntry::key_only(
				IntervalIndexKey {
					index: index.id,
					hashes: hashes(hashed),
					value: value.to_ordered()?,
					id: record.id(),
				}
				.encode(),
			)],
			None => Vec::new(),
		},
		IndexKind::Range {
			hashed,
			begin,
			end,
		} => match (record.get(*begin), record.get(*end)) {
			(Some(begin), Some(end)) => {
				let key = RangeIndexKey {
					index: index.id,
					hashes: hashes(hashed),
					begin: begin.to_ordered()?,
					end: end.to_ordered()?,
					id: record.id(),
				};
				if key.end < key.begin {
					return Err(Error::InvalidRange {
						table: table.qualified_name(),
						id: record.id().0,
					});
				}
				vec![IndexEntry {
					key: key.encode_key(),
					value: key.encode_value(),
				}]
			}
			_ => Vec::new(),
		},
	};
	Ok(entries)
}

/// Entries `record` contributes to every index of `table`.
pub(crate) fn record_entries(table: &TableDef, record: &Record) -> Result<BTreeSet<IndexEntry>> {
	let mut entries = BTreeSet::new();
	for index in &table.indexes {
		entries.extend(index_entries(table, index, record)?);
	}
	Ok(entries)
}
