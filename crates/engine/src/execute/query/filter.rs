// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use tessera_core::{
	Error, Result, SchemaError, SortDirection,
	interface::catalog::{FieldDef, FieldId, RecordId, TableDef},
};
use tessera_type::Value;

/// Which records of a table a cursor yields. Fields are named; they are
/// resolved against the table descriptor when the cursor opens.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
	All,
	Hash(HashFilter),
	Prefix(PrefixFilter),
	Interval(IntervalFilter),
	Range(RangeFilter),
	Id(IdFilter),
}

/// Equality on every named field. A `None` value asks for the field to be
/// null.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HashFilter {
	pub equals: Vec<(String, Option<Value>)>,
}

impl HashFilter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.equals.push((field.into(), Some(value.into())));
		self
	}

	pub fn with_null(mut self, field: impl Into<String>) -> Self {
		self.equals.push((field.into(), None));
		self
	}
}

/// Text search: every lexeme of `query` must prefix some lexeme of the
/// indexed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixFilter {
	pub fields: Vec<String>,
	pub query: String,
}

impl PrefixFilter {
	pub fn new(fields: &[&str], query: impl Into<String>) -> Self {
		Self {
			fields: fields.iter().map(|f| f.to_string()).collect(),
			query: query.into(),
		}
	}
}

/// Records whose `field` lies in `[begin, end]`, optionally scoped by
/// equality on the index's hashed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalFilter {
	pub equals: Vec<(String, Option<Value>)>,
	pub field: String,
	pub begin: Value,
	pub end: Value,
	pub direction: SortDirection,
}

impl IntervalFilter {
	pub fn new(field: impl Into<String>, begin: impl Into<Value>, end: impl Into<Value>) -> Self {
		Self {
			equals: Vec::new(),
			field: field.into(),
			begin: begin.into(),
			end: end.into(),
			direction: SortDirection::Asc,
		}
	}

	pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.equals.push((field.into(), Some(value.into())));
		self
	}

	pub fn with_null(mut self, field: impl Into<String>) -> Self {
		self.equals.push((field.into(), None));
		self
	}

	pub fn with_direction(mut self, direction: SortDirection) -> Self {
		self.direction = direction;
		self
	}
}

/// Records whose stored `[begin_field, end_field]` overlaps `[begin, end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
	pub equals: Vec<(String, Option<Value>)>,
	pub begin_field: String,
	pub end_field: String,
	pub begin: Value,
	pub end: Value,
	pub direction: SortDirection,
}

impl RangeFilter {
	pub fn new(
		begin_field: impl Into<String>,
		end_field: impl Into<String>,
		begin: impl Into<Value>,
		end: impl Into<Value>,
	) -> Self {
		Self {
			equals: Vec::new(),
			begin_field: begin_field.into(),
			end_field: end_field.into(),
			begin: begin.into(),
			end: end.into(),
			direction: SortDirection::Asc,
		}
	}

	/// Records whose interval contains `point`.
	pub fn point(begin_field: impl Into<String>, end_field: impl Into<String>, point: impl Into<Value>) -> Self {
		let point = point.into();
		Self::new(begin_field, end_field, point.clone(), point)
	}

	pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.equals.push((field.into(), Some(value.into())));
		self
	}

	pub fn with_null(mut self, field: impl Into<String>) -> Self {
		self.equals.push((field.into(), None));
		self
	}

	pub fn with_direction(mut self, direction: SortDirection) -> Self {
		self.direction = direction;
		self
	}
}

/// Ids in `[begin, end]`, read from the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdFilter {
	pub begin: RecordId,
	pub end: RecordId,
}

impl IdFilter {
	pub fn new(begin: u64, end: u64) -> Self {
		Self {
			begin: RecordId(begin),
			end: RecordId(end),
		}
	}
}

/// A filter plus the fields to load. Without a projection every field is
/// loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
	pub filter: Filter,
	pub fields: Option<Vec<String>>,
}

impl Query {
	pub fn new(filter: Filter) -> Self {
		Self {
			filter,
			fields: None,
		}
	}

	pub fn all() -> Self {
		Self::new(Filter::All)
	}

	pub fn with_fields(mut self, fields: &[&str]) -> Self {
		self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
		self
	}
}

impl From<Filter> for Query {
	fn from(filter: Filter) -> Self {
		Query::new(filter)
	}
}

macro_rules! impl_into_query {
	($($ty:ident => $variant:ident),*) => {
		$(
			impl From<$ty> for Filter {
				fn from(filter: $ty) -> Self {
					Filter::$variant(filter)
				}
			}

			impl From<$ty> for Query {
				fn from(filter: $ty) -> Self {
					Query::new(Filter::$variant(filter))
				}
			}
		)*
	};
}

impl_into_query!(
	HashFilter => Hash,
	PrefixFilter => Prefix,
	IntervalFilter => Interval,
	RangeFilter => Range,
	IdFilter => Id
);

pub(crate) fn resolve_field<'a>(table: &'a TableDef, name: &str) -> Result<&'a FieldDef> {
	table.field(name).ok_or_else(|| {
		SchemaError::FieldNotFound {
			table: table.qualified_name(),
			field: name.to_string(),
		}
		.into()
	})
}

/// Resolves a filter value and checks it against the field's type.
pub(crate) fn resolve_value(table: &TableDef, name: &str, value: &Value) -> Result<FieldId> {
	let field = resolve_field(table, name)?;
	let found = value.get_type();
	if found != field.ty {
		return Err(SchemaError::TypeMismatch {
			field: name.to_string(),
			expected: field.ty,
			found,
		}
		.into());
	}
	Ok(field.id)
}

/// Resolves equality constraints, sorted by field id.
pub(crate) fn resolve_equals(
	table: &TableDef,
	equals: &[(String, Option<Value>)],
) -> Result<Vec<(FieldId, Option<Value>)>> {
	let mut resolved: Vec<(FieldId, Option<Value>)> = Vec::with_capacity(equals.len());
	for (name, value) in equals {
		let id = match value {
			Some(value) => resolve_value(table, name, value)?,
			None => resolve_field(table, name)?.id,
		};
		if resolved.iter().any(|(existing, _)| *existing == id) {
			return Err(SchemaError::InvalidFilter(format!("field `{name}` is constrained twice")).into());
		}
		resolved.push((id, value.clone()));
	}
	resolved.sort_by_key(|(id, _)| *id);
	Ok(resolved)
}

/// Field ids to load: the requested projection plus whatever the cursor
/// itself needs to verify candidates.
pub(crate) fn resolve_projection(table: &TableDef, fields: Option<&[String]>) -> Result<Option<BTreeSet<FieldId>>> {
	match fields {
		None => Ok(None),
		Some(names) => {
			let mut ids = BTreeSet::new();
			for name in names {
				ids.insert(resolve_field(table, name)?.id);
			}
			Ok(Some(ids))
		}
	}
}

pub(crate) fn not_found_index(table: &TableDef, fields: impl IntoIterator<Item = String>) -> Error {
	Error::NotFoundIndex {
		table: table.qualified_name(),
		fields: fields.into_iter().collect(),
	}
}

#[cfg(test)]
mod tests {
	use tessera_core::{
		Error, SchemaError,
		interface::catalog::{FieldId, TableId},
	};
	use tessera_type::{Type, Value};

	use super::{resolve_equals, resolve_projection};
	use crate::test_utils::table_with_fields;

	#[test]
	fn test_resolve_equals_sorted() {
		let table = table_with_fields(TableId(1), &[("name", Type::String), ("size", Type::Integer)]);
		let resolved =
			resolve_equals(&table, &[("size".to_string(), Some(Value::integer(1))), ("name".to_string(), None)])
				.unwrap();
		assert_eq!(resolved[0], (FieldId(1), None));
		assert_eq!(resolved[1], (FieldId(2), Some(Value::integer(1))));
	}

	#[test]
	fn test_resolve_equals_type_mismatch() {
		let table = table_with_fields(TableId(1), &[("size", Type::Integer)]);
		let err = resolve_equals(&table, &[("size".to_string(), Some(Value::from("1")))]).unwrap_err();
		assert!(matches!(err, Error::Schema(SchemaError::TypeMismatch { .. })));
	}

	#[test]
	fn test_resolve_equals_twice() {
		let table = table_with_fields(TableId(1), &[("size", Type::Integer)]);
		let err = resolve_equals(&table, &[("size".to_string(), Some(Value::integer(1))), ("size".to_string(), None)])
			.unwrap_err();
		assert!(matches!(err, Error::Schema(SchemaError::InvalidFilter(_))));
	}

	#[test]
	fn test_resolve_projection() {
		let table = table_with_fields(TableId(1), &[("name", Type::String), ("size", Type::Integer)]);
		assert!(resolve_projection(&table, None).unwrap().is_none());
		let ids = resolve_projection(&table, Some(&["size".to_string()])).unwrap().unwrap();
		assert!(ids.contains(&FieldId(2)));
		assert!(resolve_projection(&table, Some(&["missing".to_string()])).is_err());
	}
}
