// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::Type;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Schema(#[from] SchemaError),

	#[error("no index of table `{table}` covers fields [{}]", .fields.join(", "))]
	NotFoundIndex {
		table: String,
		fields: Vec<String>,
	},

	#[error(transparent)]
	ForeignDependency(#[from] ForeignDependencyError),

	#[error(transparent)]
	Corrupted(#[from] CorruptionError),

	#[error("cursor has no more elements")]
	NoElement,

	#[error("transaction aborted: {0}")]
	Transaction(#[source] Box<Error>),

	#[error("column family `{0}` does not exist")]
	ColumnFamilyNotFound(String),

	#[error("column family `{0}` already exists")]
	ColumnFamilyExists(String),

	#[error("sequence `{0}` does not exist")]
	SequenceNotFound(String),

	#[error("sequence `{0}` is exhausted")]
	SequenceExhausted(String),

	#[error("inconsistent database: {0}")]
	InconsistentDatabase(String),

	#[error("record {id} of `{table}` has a range ending before it begins")]
	InvalidRange {
		table: String,
		id: u64,
	},

	#[error(transparent)]
	Value(#[from] tessera_type::Error),
}

impl Error {
	/// Fatal errors mean the stored layout disagrees with the catalog. They are
	/// never retried.
	pub fn is_fatal(&self) -> bool {
		match self {
			Error::Corrupted(_) => true,
			Error::Transaction(source) => source.is_fatal(),
			_ => false,
		}
	}

	/// Wraps a failure raised inside a unit of work. Already wrapped errors are
	/// passed through unchanged.
	pub fn transaction(source: Error) -> Error {
		match source {
			err @ Error::Transaction(_) => err,
			err => Error::Transaction(Box::new(err)),
		}
	}

	/// The innermost error, looking through transaction wrappers.
	pub fn root(&self) -> &Error {
		match self {
			Error::Transaction(source) => source.root(),
			err => err,
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
	#[error("schema already exists")]
	AlreadyExists,

	#[error("schema not found")]
	NotFound,

	#[error("schema document is corrupted: {0}")]
	Corrupted(String),

	#[error("schema version mismatch: expected {expected}, found {found}")]
	VersionMismatch {
		expected: String,
		found: String,
	},

	#[error("table `{namespace}.{name}` already exists")]
	TableAlreadyExists {
		namespace: String,
		name: String,
	},

	#[error("table `{namespace}.{name}` not found")]
	TableNotFound {
		namespace: String,
		name: String,
	},

	#[error("field `{field}` already exists in table `{table}`")]
	FieldAlreadyExists {
		table: String,
		field: String,
	},

	#[error("field `{field}` not found in table `{table}`")]
	FieldNotFound {
		table: String,
		field: String,
	},

	#[error("index {index} already exists in table `{table}`")]
	IndexAlreadyExists {
		table: String,
		index: String,
	},

	#[error("invalid index on table `{table}`: {reason}")]
	InvalidIndex {
		table: String,
		reason: String,
	},

	#[error("field `{field}` expects {expected}, found {found}")]
	TypeMismatch {
		field: String,
		expected: Type,
		found: Type,
	},

	#[error("invalid filter: {0}")]
	InvalidFilter(String),

	#[error("inconsistent catalog: {0}")]
	Inconsistent(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ForeignDependencyError {
	#[error("record {id} of `{table}` is still referenced by `{by}`")]
	Referenced {
		table: String,
		id: u64,
		by: String,
	},

	#[error("field `{field}` references record {id} of `{table}`, which does not exist")]
	MissingTarget {
		field: String,
		table: String,
		id: u64,
	},

	#[error("table `{table}` is still referenced by `{by}`")]
	TableReferenced {
		table: String,
		by: String,
	},
}

#[derive(Debug, thiserror::Error)]
pub enum CorruptionError {
	#[error("unexpected end of record {id} in `{column_family}`: no beginning-of-object key")]
	UnexpectedEndOfRecord {
		column_family: String,
		id: u64,
	},

	#[error("malformed key {key:02x?} in `{column_family}`")]
	KeyCorrupted {
		column_family: String,
		key: Vec<u8>,
	},

	#[error("field {field} of record {id} in `{column_family}` is not declared by the catalog")]
	UnknownField {
		column_family: String,
		id: u64,
		field: u32,
	},

	#[error("index entry in `{column_family}` points at missing record {id}")]
	DanglingIndexEntry {
		column_family: String,
		id: u64,
	},

	#[error("stored value of field {field} in record {id} is unreadable: {source}")]
	Value {
		id: u64,
		field: u32,
		#[source]
		source: tessera_type::Error,
	},
}

#[cfg(test)]
mod tests {
	use super::{CorruptionError, Error, SchemaError};

	#[test]
	fn test_fatal_kinds() {
		let corrupted = Error::Corrupted(CorruptionError::UnexpectedEndOfRecord {
			column_family: "app.t1".to_string(),
			id: 7,
		});
		assert!(corrupted.is_fatal());
		assert!(!Error::NoElement.is_fatal());
		assert!(!Error::Schema(SchemaError::NotFound).is_fatal());
	}

	#[test]
	fn test_transaction_wrapping() {
		let corrupted = Error::Corrupted(CorruptionError::KeyCorrupted {
			column_family: "app.t1".to_string(),
			key: vec![1, 2],
		});
		let wrapped = Error::transaction(corrupted);
		assert!(wrapped.is_fatal());

		let twice = Error::transaction(wrapped);
		assert!(matches!(twice, Error::Transaction(ref source) if !matches!(**source, Error::Transaction(_))));
		assert!(matches!(twice.root(), Error::Corrupted(_)));
	}

	#[test]
	fn test_messages() {
		let err = Error::NotFoundIndex {
			table: "file".to_string(),
			fields: vec!["size".to_string(), "name".to_string()],
		};
		assert_eq!(err.to_string(), "no index of table `file` covers fields [size, name]");
	}
}
