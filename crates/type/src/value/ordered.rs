// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Order-preserving 64-bit projection of numeric and temporal values.
//!
//! Encoding the returned `u64` big-endian yields bytes whose lexicographic
//! order equals the numeric order of the source values.

use crate::{Error, Result, Type, Value};

const SIGN: u64 = 1 << 63;

pub fn from_i64(v: i64) -> u64 {
	(v as u64) ^ SIGN
}

pub fn to_i64(v: u64) -> i64 {
	(v ^ SIGN) as i64
}

/// Flips the sign bit of positive doubles and every bit of negative ones.
pub fn from_f64(v: f64) -> u64 {
	let bits = v.to_bits();
	if bits & SIGN != 0 {
		!bits
	} else {
		bits ^ SIGN
	}
}

pub fn to_f64(v: u64) -> f64 {
	if v & SIGN != 0 {
		f64::from_bits(v ^ SIGN)
	} else {
		f64::from_bits(!v)
	}
}

impl Value {
	/// Order-preserving projection, defined for orderable types only.
	pub fn to_ordered(&self) -> Result<u64> {
		match self {
			Value::Integer(v) | Value::Timestamp(v) => Ok(from_i64(*v)),
			Value::Double(v) => Ok(from_f64(*v)),
			other => Err(Error::NotOrderable(other.get_type())),
		}
	}

	pub fn from_ordered(ty: Type, v: u64) -> Result<Value> {
		match ty {
			Type::Integer => Ok(Value::Integer(to_i64(v))),
			Type::Timestamp => Ok(Value::Timestamp(to_i64(v))),
			Type::Double => Ok(Value::Double(to_f64(v))),
			other => Err(Error::NotOrderable(other)),
		}
	}
}
