// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// All field types a table can declare
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
	/// A UTF-8 encoded text.
	String,
	/// An opaque byte string.
	Bytes,
	/// An 8-byte signed integer
	Integer,
	/// A boolean: true or false.
	Boolean,
	/// An 8-byte floating point
	Double,
	/// Microseconds since the unix epoch
	Timestamp,
}

impl Type {
	/// Whether values of this type take part in a hash key as their own
	/// order-preserving 64-bit form instead of a digest.
	pub fn is_integer_castable(&self) -> bool {
		matches!(self, Type::Integer | Type::Boolean | Type::Timestamp)
	}

	/// Whether values of this type can drive an interval or range index.
	pub fn is_orderable(&self) -> bool {
		matches!(self, Type::Integer | Type::Double | Type::Timestamp)
	}

	/// Encoded width in bytes, `None` for variable length types.
	pub fn fixed_size(&self) -> Option<usize> {
		match self {
			Type::String | Type::Bytes => None,
			Type::Boolean => Some(1),
			Type::Integer | Type::Double | Type::Timestamp => Some(8),
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::String => f.write_str("STRING"),
			Type::Bytes => f.write_str("BYTES"),
			Type::Integer => f.write_str("INTEGER"),
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Double => f.write_str("DOUBLE"),
			Type::Timestamp => f.write_str("TIMESTAMP"),
		}
	}
}
