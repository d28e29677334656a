// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	Result, SchemaError,
	interface::catalog::{FieldId, IndexKind, TableDef},
};
use tessera_type::Type;

#[derive(Debug, Clone)]
pub struct TableToCreate {
	pub namespace: String,
	pub name: String,
	pub fields: Vec<FieldToCreate>,
	pub indexes: Vec<IndexToCreate>,
}

impl TableToCreate {
	pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			name: name.into(),
			fields: Vec::new(),
			indexes: Vec::new(),
		}
	}

	pub fn with_field(mut self, field: FieldToCreate) -> Self {
		self.fields.push(field);
		self
	}

	pub fn with_index(mut self, index: IndexToCreate) -> Self {
		self.indexes.push(index);
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
	pub namespace: String,
	pub table: String,
}

#[derive(Debug, Clone)]
pub struct FieldToCreate {
	pub name: String,
	pub ty: Type,
	pub foreign_key: Option<ForeignKey>,
}

impl FieldToCreate {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			foreign_key: None,
		}
	}

	/// An integer field holding ids of records in `namespace.table`.
	pub fn foreign(name: impl Into<String>, namespace: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			ty: Type::Integer,
			foreign_key: Some(ForeignKey {
				namespace: namespace.into(),
				table: table.into(),
			}),
		}
	}
}

/// An index described by field names, resolved against a table descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexToCreate {
	Hash {
		fields: Vec<String>,
	},
	Prefix {
		fields: Vec<String>,
	},
	Interval {
		hashed: Vec<String>,
		indexed: String,
	},
	Range {
		hashed: Vec<String>,
		begin: String,
		end: String,
	},
}

fn names(fields: &[&str]) -> Vec<String> {
	fields.iter().map(|f| f.to_string()).collect()
}

impl IndexToCreate {
	pub fn hash(fields: &[&str]) -> Self {
		IndexToCreate::Hash {
			fields: names(fields),
		}
	}

	pub fn prefix(fields: &[&str]) -> Self {
		IndexToCreate::Prefix {
			fields: names(fields),
		}
	}

	pub fn interval(hashed: &[&str], indexed: &str) -> Self {
		IndexToCreate::Interval {
			hashed: names(hashed),
			indexed: indexed.to_string(),
		}
	}

	pub fn range(hashed: &[&str], begin: &str, end: &str) -> Self {
		IndexToCreate::Range {
			hashed: names(hashed),
			begin: begin.to_string(),
			end: end.to_string(),
		}
	}

	/// Maps field names to ids and checks the field types the index kind
	/// requires.
	pub fn resolve(&self, table: &TableDef) -> Result<IndexKind> {
		let invalid = |reason: String| SchemaError::InvalidIndex {
			table: table.name.clone(),
			reason,
		};

		let kind = match self {
			IndexToCreate::Hash {
				fields,
			} => {
				if fields.is_empty() {
					return Err(invalid("hash index needs at least one field".to_string()).into());
				}
				IndexKind::Hash {
					fields: resolve_all(table, fields)?,
				}
			}
			IndexToCreate::Prefix {
				fields,
			} => {
				if fields.is_empty() {
					return Err(invalid("prefix index needs at least one field".to_string()).into());
				}
				let ids = resolve_all(table, fields)?;
				for (name, id) in fields.iter().zip(&ids) {
					if field_type(table, *id) != Some(Type::String) {
						return Err(invalid(format!("prefix index field `{name}` is not a string")).into());
					}
				}
				IndexKind::Prefix {
					fields: ids,
				}
			}
			IndexToCreate::Interval {
				hashed,
				indexed,
			} => {
				let indexed_id = resolve_one(table, indexed)?;
				if !field_type(table, indexed_id).is_some_and(|ty| ty.is_orderable()) {
					return Err(invalid(format!("interval index field `{indexed}` is not orderable")).into());
				}
				IndexKind::Interval {
					hashed: resolve_all(table, hashed)?,
					indexed: indexed_id,
				}
			}
			IndexToCreate::Range {
				hashed,
				begin,
				end,
			} => {
				let begin_id = resolve_one(table, begin)?;
				let end_id = resolve_one(table, end)?;
				let begin_type = field_type(table, begin_id);
				if !begin_type.is_some_and(|ty| ty.is_orderable()) {
					return Err(invalid(format!("range index field `{begin}` is not orderable")).into());
				}
				if begin_type != field_type(table, end_id) {
					return Err(invalid(format!("range fields `{begin}` and `{end}` differ in type")).into());
				}
				if begin_id == end_id {
					return Err(invalid("range begin and end must be distinct fields".to_string()).into());
				}
				IndexKind::Range {
					hashed: resolve_all(table, hashed)?,
					begin: begin_id,
					end: end_id,
				}
			}
		};

		Ok(kind.normalized())
	}
}

fn field_type(table: &TableDef, id: FieldId) -> Option<Type> {
	table.field_by_id(id).map(|f| f.ty)
}

fn resolve_one(table: &TableDef, name: &str) -> Result<FieldId> {
	table.field(name).map(|f| f.id).ok_or_else(|| {
		SchemaError::FieldNotFound {
			table: table.name.clone(),
			field: name.to_string(),
		}
		.into()
	})
}

fn resolve_all(table: &TableDef, names: &[String]) -> Result<Vec<FieldId>> {
	names.iter().map(|name| resolve_one(table, name)).collect()
}
