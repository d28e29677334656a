// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Keycode is a lexicographical order-preserving binary encoding for use with
//! keys in key/value stores.
//!
//! Ordering is important because it allows limited scans across specific parts
//! of the keyspace, e.g. scanning one index or one equality group of an index.
//!
//! The encoding is not self-describing: the caller must know the structure of
//! the key it decodes.
//!
//! * [`u8`]: the byte itself.
//! * [`u32`], [`u64`]: big-endian binary representation.
//! * [`i64`]: big-endian binary, sign bit flipped.
//! * [`f64`]: big-endian binary, sign bit flipped, all flipped if negative.
//! * byte strings: `0x00` escaped as `0x00ff`, terminated with `0x0000`.

mod deserialize;
mod serialize;

pub use deserialize::KeyDeserializer;
pub use serialize::KeySerializer;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
	#[error("unexpected end of key, needed {needed} more bytes")]
	UnexpectedEnd {
		needed: usize,
	},

	#[error("unterminated byte string")]
	Unterminated,

	#[error("invalid escape sequence 0x00{0:02x}")]
	InvalidEscape(u8),
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
