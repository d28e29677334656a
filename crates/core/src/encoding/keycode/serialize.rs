// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::ordered;

use crate::EncodedKey;

#[derive(Debug, Default)]
pub struct KeySerializer {
	buffer: Vec<u8>,
}

impl KeySerializer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buffer: Vec::with_capacity(capacity),
		}
	}

	pub fn extend_u8(&mut self, value: u8) -> &mut Self {
		self.buffer.push(value);
		self
	}

	pub fn extend_u32(&mut self, value: u32) -> &mut Self {
		self.buffer.extend_from_slice(&value.to_be_bytes());
		self
	}

	pub fn extend_u64(&mut self, value: impl Into<u64>) -> &mut Self {
		self.buffer.extend_from_slice(&value.into().to_be_bytes());
		self
	}

	pub fn extend_i64(&mut self, value: i64) -> &mut Self {
		self.extend_u64(ordered::from_i64(value))
	}

	pub fn extend_f64(&mut self, value: f64) -> &mut Self {
		self.extend_u64(ordered::from_f64(value))
	}

	/// Escaped and terminated, so shorter strings sort before their extensions.
	pub fn extend_bytes(&mut self, bytes: &[u8]) -> &mut Self {
		self.extend_bytes_prefix(bytes);
		self.buffer.extend_from_slice(&[0x00, 0x00]);
		self
	}

	/// Escaped but not terminated: a prefix of every encoded string starting
	/// with `bytes`.
	pub fn extend_bytes_prefix(&mut self, bytes: &[u8]) -> &mut Self {
		for &b in bytes {
			match b {
				0x00 => self.buffer.extend_from_slice(&[0x00, 0xff]),
				b => self.buffer.push(b),
			}
		}
		self
	}

	pub fn extend_raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.buffer.extend_from_slice(bytes);
		self
	}

	pub fn len(&self) -> usize {
		self.buffer.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}

	pub fn finish(self) -> Vec<u8> {
		self.buffer
	}

	pub fn to_encoded_key(self) -> EncodedKey {
		EncodedKey::new(self.buffer)
	}
}

#[cfg(test)]
mod tests {
	use super::KeySerializer;

	#[test]
	fn test_integers() {
		let mut serializer = KeySerializer::new();
		serializer.extend_u8(0xAB).extend_u32(1).extend_u64(2u64);
		assert_eq!(serializer.finish(), vec![0xAB, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 2]);
	}

	#[test]
	fn test_i64_sign_flip() {
		let mut serializer = KeySerializer::new();
		serializer.extend_i64(-1).extend_i64(0);
		assert_eq!(
			serializer.finish(),
			vec![0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x80, 0, 0, 0, 0, 0, 0, 0]
		);
	}

	#[test]
	fn test_bytes_escaped() {
		let mut serializer = KeySerializer::new();
		serializer.extend_bytes(&[0x01, 0x00, 0x02]);
		assert_eq!(serializer.finish(), vec![0x01, 0x00, 0xff, 0x02, 0x00, 0x00]);
	}

	#[test]
	fn test_bytes_order() {
		let encode = |b: &[u8]| {
			let mut serializer = KeySerializer::new();
			serializer.extend_bytes(b);
			serializer.finish()
		};
		assert!(encode(b"ab") < encode(b"abc"));
		assert!(encode(b"ab") < encode(b"ab\x00"));
		assert!(encode(b"abc") < encode(b"abd"));
	}

	#[test]
	fn test_prefix_is_prefix() {
		let mut prefix = KeySerializer::new();
		prefix.extend_bytes_prefix(b"tes");
		let prefix = prefix.finish();

		let mut full = KeySerializer::new();
		full.extend_bytes(b"test");
		assert!(full.finish().starts_with(&prefix));
	}
}
