// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{Error, Result, Type, Value};

impl Value {
	/// Encodes the value into the bytes stored under its field key.
	pub fn encode(&self) -> Vec<u8> {
		match self {
			Value::String(v) => v.as_bytes().to_vec(),
			Value::Bytes(v) => v.clone(),
			Value::Integer(v) | Value::Timestamp(v) => v.to_be_bytes().to_vec(),
			Value::Boolean(v) => vec![*v as u8],
			Value::Double(v) => v.to_bits().to_be_bytes().to_vec(),
		}
	}

	/// Decodes bytes previously produced by [`Value::encode`] for a value of type `ty`.
	pub fn decode(ty: Type, bytes: &[u8]) -> Result<Value> {
		if let Some(expected) = ty.fixed_size() {
			if bytes.len() != expected {
				return Err(Error::InvalidLength {
					ty,
					expected,
					found: bytes.len(),
				});
			}
		}

		Ok(match ty {
			Type::String => Value::String(String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidUtf8)?),
			Type::Bytes => Value::Bytes(bytes.to_vec()),
			Type::Integer => Value::Integer(read_i64(bytes)),
			Type::Timestamp => Value::Timestamp(read_i64(bytes)),
			Type::Double => Value::Double(f64::from_bits(read_i64(bytes) as u64)),
			Type::Boolean => match bytes[0] {
				0 => Value::Boolean(false),
				1 => Value::Boolean(true),
				b => return Err(Error::InvalidBoolean(b)),
			},
		})
	}
}

fn read_i64(bytes: &[u8]) -> i64 {
	let mut buf = [0u8; 8];
	buf.copy_from_slice(bytes);
	i64::from_be_bytes(buf)
}

#[cfg(test)]
mod tests {
	use crate::{Error, Type, Value};

	#[test]
	fn test_integer() {
		let encoded = Value::integer(-2).encode();
		assert_eq!(encoded, vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);
		assert_eq!(Value::decode(Type::Integer, &encoded).unwrap(), Value::integer(-2));
	}

	#[test]
	fn test_string_and_bytes() {
		let encoded = Value::string("héllo").encode();
		assert_eq!(Value::decode(Type::String, &encoded).unwrap(), Value::string("héllo"));

		let encoded = Value::bytes(vec![0, 1, 2]).encode();
		assert_eq!(encoded, vec![0, 1, 2]);
		assert_eq!(Value::decode(Type::Bytes, &encoded).unwrap(), Value::bytes(vec![0, 1, 2]));
	}

	#[test]
	fn test_double_keeps_bits() {
		for v in [0.0, -0.0, 1.5, -1.5, f64::MAX, f64::MIN_POSITIVE] {
			let decoded = Value::decode(Type::Double, &Value::double(v).encode()).unwrap();
			match decoded {
				Value::Double(d) => assert_eq!(d.to_bits(), v.to_bits()),
				other => panic!("unexpected {other:?}"),
			}
		}
	}

	#[test]
	fn test_boolean() {
		assert_eq!(Value::decode(Type::Boolean, &[1]).unwrap(), Value::boolean(true));
		assert_eq!(Value::decode(Type::Boolean, &[0]).unwrap(), Value::boolean(false));
		assert_eq!(Value::decode(Type::Boolean, &[7]).unwrap_err(), Error::InvalidBoolean(7));
	}

	#[test]
	fn test_wrong_width() {
		let err = Value::decode(Type::Timestamp, &[1, 2, 3]).unwrap_err();
		assert_eq!(
			err,
			Error::InvalidLength {
				ty: Type::Timestamp,
				expected: 8,
				found: 3
			}
		);
	}

	#[test]
	fn test_invalid_utf8() {
		assert_eq!(Value::decode(Type::String, &[0xff, 0xfe]).unwrap_err(), Error::InvalidUtf8);
	}
}
