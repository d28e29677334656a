// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

mod encode;
pub mod ordered;
mod r#type;

pub use r#type::Type;

/// A field value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// A UTF-8 encoded text.
	String(String),
	/// An opaque byte string.
	Bytes(Vec<u8>),
	/// An 8-byte signed integer
	Integer(i64),
	/// A boolean: true or false.
	Boolean(bool),
	/// An 8-byte floating point
	Double(f64),
	/// Microseconds since the unix epoch
	Timestamp(i64),
}

impl Value {
	pub fn string(v: impl Into<String>) -> Self {
		Value::String(v.into())
	}

	pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
		Value::Bytes(v.into())
	}

	pub fn integer(v: impl Into<i64>) -> Self {
		Value::Integer(v.into())
	}

	pub fn boolean(v: bool) -> Self {
		Value::Boolean(v)
	}

	pub fn double(v: impl Into<f64>) -> Self {
		Value::Double(v.into())
	}

	pub fn timestamp(micros: i64) -> Self {
		Value::Timestamp(micros)
	}

	pub fn get_type(&self) -> Type {
		match self {
			Value::String(_) => Type::String,
			Value::Bytes(_) => Type::Bytes,
			Value::Integer(_) => Type::Integer,
			Value::Boolean(_) => Type::Boolean,
			Value::Double(_) => Type::Double,
			Value::Timestamp(_) => Type::Timestamp,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Value::Integer(v) | Value::Timestamp(v) => Some(*v),
			Value::Boolean(v) => Some(*v as i64),
			_ => None,
		}
	}

	/// Fails with `TypeMismatch` unless this value is of type `expected`.
	pub fn expect_type(&self, expected: Type) -> crate::Result<()> {
		let found = self.get_type();
		if found != expected {
			return Err(crate::Error::TypeMismatch {
				expected,
				found,
			});
		}
		Ok(())
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::String(v) => Display::fmt(v, f),
			Value::Bytes(v) => {
				f.write_str("0x")?;
				for b in v {
					write!(f, "{b:02x}")?;
				}
				Ok(())
			}
			Value::Integer(v) => Display::fmt(v, f),
			Value::Boolean(v) => Display::fmt(v, f),
			Value::Double(v) => Display::fmt(v, f),
			Value::Timestamp(v) => write!(f, "{v}us"),
		}
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Value::Bytes(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Integer(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Integer(v as i64)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Double(v)
	}
}
