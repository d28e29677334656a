// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{BTreeSet, btree_set};

use tessera_core::{
	EncodableKey, KeyPattern, Record, Result, SchemaError,
	interface::catalog::{FieldId, IndexKind, RecordId, TableDef},
	key::PrefixIndexKey,
	lexeme::{contains_all_prefixes, lexemes},
};
use tessera_store::{Snapshot, StoreRead};
use tracing::{instrument, trace};

use crate::execute::query::{
	PrefixFilter, Projection, Scan, corrupted_key, dangling,
	filter::{not_found_index, resolve_field},
	find_index,
	reader::RecordReader,
};

/// Text search through a prefix index.
///
/// Postings of the longest query lexeme are collected up front, in id order
/// and without duplicates. Each candidate is then checked so that every query
/// lexeme prefixes some lexeme of its indexed text.
pub(crate) struct PrefixScan {
	snapshot: Snapshot,
	reader: RecordReader,
	projection: Projection,
	fields: Vec<FieldId>,
	query: BTreeSet<String>,
	candidates: btree_set::IntoIter<RecordId>,
	column_family: String,
}

impl PrefixScan {
	#[instrument(name = "query::prefix::open", level = "trace", skip_all, fields(table = %table.qualified_name()))]
	pub(crate) fn open(snapshot: Snapshot, table: TableDef, filter: &PrefixFilter, projection: Projection) -> Result<Self> {
		let mut fields = filter
			.fields
			.iter()
			.map(|name| resolve_field(&table, name).map(|field| field.id))
			.collect::<Result<Vec<_>>>()?;
		fields.sort();
		fields.dedup();
		if fields.is_empty() {
			return Err(SchemaError::InvalidFilter("prefix filter names no field".to_string()).into());
		}

		let index = find_index(&table, |kind| matches!(kind, IndexKind::Prefix { fields: indexed } if *indexed == fields))
			.ok_or_else(|| not_found_index(&table, filter.fields.iter().cloned()))?
			.id;

		let query = lexemes(&filter.query);
		let mut driving: Option<&String> = None;
		for lexeme in &query {
			if driving.is_none_or(|d| lexeme.len() > d.len()) {
				driving = Some(lexeme);
			}
		}

		let column_family = table.index_column_family();
		let mut candidates = BTreeSet::new();
		if let Some(driving) = driving {
			let pattern = KeyPattern::new(PrefixIndexKey::scan_prefix(index, driving).0);
			let mut cursor = snapshot.cursor(&column_family)?;
			let mut entry = cursor.seek_pattern(&pattern);
			while let Some(found) = entry {
				let key = PrefixIndexKey::decode(&found.key).ok_or_else(|| corrupted_key(&column_family, &found.key))?;
				candidates.insert(key.id);
				entry = cursor.next_matching(&pattern);
			}
			trace!(lexeme = %driving, candidates = candidates.len(), "collected postings");
		}

		let reader = RecordReader::new(table, projection.loading(fields.iter().copied()));
		Ok(Self {
			snapshot,
			reader,
			projection,
			fields,
			query,
			candidates: candidates.into_iter(),
			column_family,
		})
	}

	fn matches(&self, record: &Record) -> bool {
		let mut text = BTreeSet::new();
		for field in &self.fields {
			if let Some(value) = record.get(*field).and_then(|v| v.as_str()) {
				text.extend(lexemes(value));
			}
		}
		contains_all_prefixes(&self.query, &text)
	}
}

impl Scan for PrefixScan {
	fn advance(&mut self) -> Result<Option<Record>> {
		while let Some(id) = self.candidates.next() {
			let mut record =
				self.reader.get(&self.snapshot, id)?.ok_or_else(|| dangling(&self.column_family, id))?;
			if !self.matches(&record) {
				continue;
			}
			self.projection.apply(&mut record);
			return Ok(Some(record));
		}
		Ok(None)
	}

	fn close(&mut self) {
		self.candidates = BTreeSet::new().into_iter();
	}
}

#[cfg(test)]
mod tests {
	use tessera_core::{Error, interface::catalog::FieldId};
	use tessera_type::Value;

	use crate::{
		Engine, PrefixFilter, Query,
		test_utils::{file_table, insert_file},
	};

	fn names(engine: &Engine, query: &str) -> Vec<String> {
		engine
			.select("file", "app", PrefixFilter::new(&["name"], query))
			.unwrap()
			.map(|r| r.unwrap().get(FieldId(1)).and_then(Value::as_str).unwrap().to_string())
			.collect()
	}

	#[test]
	fn test_prefix_case_insensitive() {
		let (engine, _) = file_table();
		insert_file(&engine, "Test file", 1);
		insert_file(&engine, "other", 2);
		insert_file(&engine, "latest", 3);

		assert_eq!(names(&engine, "tes"), vec!["Test file"]);
		assert_eq!(names(&engine, "TEST"), vec!["Test file"]);
	}

	#[test]
	fn test_lexemes_intersect() {
		let (engine, _) = file_table();
		insert_file(&engine, "Test file", 1);
		insert_file(&engine, "test case", 2);
		insert_file(&engine, "final report", 3);

		assert_eq!(names(&engine, "fi tes"), vec!["Test file"]);
		assert_eq!(names(&engine, "fi"), vec!["Test file", "final report"]);
	}

	#[test]
	fn test_record_returned_once() {
		let (engine, _) = file_table();
		insert_file(&engine, "test testing tester", 1);
		assert_eq!(names(&engine, "test"), vec!["test testing tester"]);
	}

	#[test]
	fn test_empty_query() {
		let (engine, _) = file_table();
		insert_file(&engine, "Test file", 1);
		assert!(names(&engine, " ,; ").is_empty());
	}

	#[test]
	fn test_projection_strips_text() {
		let (engine, _) = file_table();
		insert_file(&engine, "Test file", 9);

		let query = Query::from(PrefixFilter::new(&["name"], "file")).with_fields(&["size"]);
		let records: Vec<_> = engine.select("file", "app", query).unwrap().map(|r| r.unwrap()).collect();
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].get(FieldId(1)), None);
		assert_eq!(records[0].get(FieldId(2)), Some(&Value::integer(9)));
	}

	#[test]
	fn test_no_prefix_index() {
		let (engine, _) = file_table();
		let err = engine.select("file", "app", PrefixFilter::new(&["size"], "1")).err().unwrap();
		assert!(matches!(err, Error::NotFoundIndex { .. }));
	}
}
