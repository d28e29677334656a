// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{BTreeMap, BTreeSet};

use tessera_type::Value;

use crate::interface::catalog::{FieldId, RecordId, TableId};

/// One row of a table. Null fields are absent from `values`.
///
/// A record remembers which fields were set or cleared since it was loaded.
/// Saving an existing record writes only those, so a record loaded with a
/// projection can be modified and saved without losing the fields it never
/// loaded. Equality ignores the change set.
#[derive(Debug, Clone)]
pub struct Record {
	table: TableId,
	id: RecordId,
	values: BTreeMap<FieldId, Value>,
	changed: BTreeSet<FieldId>,
}

impl Record {
	pub fn new(table: TableId, id: RecordId) -> Self {
		Self {
			table,
			id,
			values: BTreeMap::new(),
			changed: BTreeSet::new(),
		}
	}

	pub fn table(&self) -> TableId {
		self.table
	}

	pub fn id(&self) -> RecordId {
		self.id
	}

	pub fn get(&self, field: FieldId) -> Option<&Value> {
		self.values.get(&field)
	}

	pub fn set(&mut self, field: FieldId, value: impl Into<Value>) -> &mut Self {
		self.values.insert(field, value.into());
		self.changed.insert(field);
		self
	}

	pub fn set_option(&mut self, field: FieldId, value: Option<Value>) -> &mut Self {
		match value {
			Some(value) => self.values.insert(field, value),
			None => self.values.remove(&field),
		};
		self.changed.insert(field);
		self
	}

	pub fn clear(&mut self, field: FieldId) -> Option<Value> {
		self.changed.insert(field);
		self.values.remove(&field)
	}

	/// Fields set or cleared since the record was loaded, with their current
	/// value; `None` means cleared.
	pub fn changes(&self) -> impl Iterator<Item = (FieldId, Option<&Value>)> {
		self.changed.iter().map(|field| (*field, self.values.get(field)))
	}

	pub fn is_changed(&self, field: FieldId) -> bool {
		self.changed.contains(&field)
	}

	/// Forgets the change set, as after loading the record from the store.
	pub fn mark_unchanged(&mut self) {
		self.changed.clear();
	}

	/// Keeps only the fields for which `keep` holds.
	pub fn retain(&mut self, mut keep: impl FnMut(FieldId) -> bool) {
		self.values.retain(|field, _| keep(*field));
	}

	pub fn values(&self) -> impl Iterator<Item = (FieldId, &Value)> {
		self.values.iter().map(|(field, value)| (*field, value))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl PartialEq for Record {
	fn eq(&self, other: &Self) -> bool {
		self.table == other.table && self.id == other.id && self.values == other.values
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::Value;

	use super::Record;
	use crate::interface::catalog::{FieldId, RecordId, TableId};

	#[test]
	fn test_set_and_clear() {
		let mut record = Record::new(TableId(1), RecordId(9));
		record.set(FieldId(1), "a").set(FieldId(2), 5i64);
		assert_eq!(record.get(FieldId(1)), Some(&Value::string("a")));
		assert_eq!(record.len(), 2);

		record.set_option(FieldId(2), None);
		assert_eq!(record.get(FieldId(2)), None);

		assert_eq!(record.clear(FieldId(1)), Some(Value::string("a")));
		assert!(record.is_empty());
	}

	#[test]
	fn test_changes() {
		let mut record = Record::new(TableId(1), RecordId(1));
		record.set(FieldId(1), "a").set(FieldId(2), 5i64);
		record.mark_unchanged();
		assert_eq!(record.changes().count(), 0);

		record.set(FieldId(2), 6i64);
		record.clear(FieldId(3));
		let changes: Vec<_> = record.changes().collect();
		assert_eq!(changes, vec![(FieldId(2), Some(&Value::integer(6))), (FieldId(3), None)]);
		assert!(!record.is_changed(FieldId(1)));

		let mut loaded = Record::new(TableId(1), RecordId(1));
		loaded.set(FieldId(1), "a").set(FieldId(2), 6i64);
		assert_eq!(loaded, record);
	}

	#[test]
	fn test_values_ordered_by_field() {
		let mut record = Record::new(TableId(1), RecordId(1));
		record.set(FieldId(3), 3i64).set(FieldId(1), 1i64);
		let fields: Vec<FieldId> = record.values().map(|(f, _)| f).collect();
		assert_eq!(fields, vec![FieldId(1), FieldId(3)]);
	}
}
