// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::ordered;

use super::{DecodeError, DecodeResult};

pub struct KeyDeserializer<'a> {
	input: &'a [u8],
}

impl<'a> KeyDeserializer<'a> {
	pub fn from_bytes(input: &'a [u8]) -> Self {
		Self {
			input,
		}
	}

	fn take(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
		if self.input.len() < len {
			return Err(DecodeError::UnexpectedEnd {
				needed: len - self.input.len(),
			});
		}
		let (head, tail) = self.input.split_at(len);
		self.input = tail;
		Ok(head)
	}

	pub fn read_u8(&mut self) -> DecodeResult<u8> {
		Ok(self.take(1)?[0])
	}

	pub fn read_u32(&mut self) -> DecodeResult<u32> {
		let mut buf = [0u8; 4];
		buf.copy_from_slice(self.take(4)?);
		Ok(u32::from_be_bytes(buf))
	}

	pub fn read_u64(&mut self) -> DecodeResult<u64> {
		let mut buf = [0u8; 8];
		buf.copy_from_slice(self.take(8)?);
		Ok(u64::from_be_bytes(buf))
	}

	pub fn read_i64(&mut self) -> DecodeResult<i64> {
		Ok(ordered::to_i64(self.read_u64()?))
	}

	pub fn read_f64(&mut self) -> DecodeResult<f64> {
		Ok(ordered::to_f64(self.read_u64()?))
	}

	pub fn read_bytes(&mut self) -> DecodeResult<Vec<u8>> {
		let mut out = Vec::new();
		let mut iter = self.input.iter().enumerate();
		let taken = loop {
			match iter.next() {
				Some((_, 0x00)) => match iter.next() {
					Some((i, 0x00)) => break i + 1,
					Some((_, 0xff)) => out.push(0x00),
					Some((_, b)) => return Err(DecodeError::InvalidEscape(*b)),
					None => return Err(DecodeError::Unterminated),
				},
				Some((_, b)) => out.push(*b),
				None => return Err(DecodeError::Unterminated),
			}
		};
		self.input = &self.input[taken..];
		Ok(out)
	}

	pub fn remaining(&self) -> &'a [u8] {
		self.input
	}

	pub fn is_empty(&self) -> bool {
		self.input.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::KeyDeserializer;
	use crate::encoding::keycode::{DecodeError, KeySerializer};

	#[test]
	fn test_read_sequence() {
		let mut serializer = KeySerializer::new();
		serializer.extend_u8(3).extend_u32(7).extend_i64(-9).extend_bytes(b"a\x00b").extend_u64(11u64);
		let bytes = serializer.finish();

		let mut de = KeyDeserializer::from_bytes(&bytes);
		assert_eq!(de.read_u8().unwrap(), 3);
		assert_eq!(de.read_u32().unwrap(), 7);
		assert_eq!(de.read_i64().unwrap(), -9);
		assert_eq!(de.read_bytes().unwrap(), b"a\x00b".to_vec());
		assert_eq!(de.read_u64().unwrap(), 11);
		assert!(de.is_empty());
	}

	#[test]
	fn test_unexpected_end() {
		let mut de = KeyDeserializer::from_bytes(&[1, 2, 3]);
		assert_eq!(
			de.read_u64().unwrap_err(),
			DecodeError::UnexpectedEnd {
				needed: 5
			}
		);
	}

	#[test]
	fn test_unterminated() {
		let mut de = KeyDeserializer::from_bytes(b"abc");
		assert_eq!(de.read_bytes().unwrap_err(), DecodeError::Unterminated);

		let mut de = KeyDeserializer::from_bytes(&[0x61, 0x00, 0x07]);
		assert_eq!(de.read_bytes().unwrap_err(), DecodeError::InvalidEscape(0x07));
	}
}
