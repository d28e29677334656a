// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixed-width hash components of index keys.
//!
//! Integer-castable values take part as their own order-preserving form and
//! therefore never collide, with one exception: `i64::MIN` maps to zero, which
//! is also the component of a null value. Every other value is digested with
//! xxh3 and may collide.

use tessera_type::{Value, ordered};
use xxhash_rust::xxh3::xxh3_64;

const NULL: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashComponent {
	pub value: u64,
	/// Whether equal components imply equal field values.
	pub exact: bool,
}

pub fn hash_value(value: Option<&Value>) -> HashComponent {
	let Some(value) = value else {
		return HashComponent {
			value: NULL,
			exact: false,
		};
	};

	if value.get_type().is_integer_castable() {
		if let Some(v) = value.as_integer() {
			let value = ordered::from_i64(v);
			return HashComponent {
				value,
				exact: value != NULL,
			};
		}
	}

	HashComponent {
		value: xxh3_64(&value.encode()),
		exact: false,
	}
}
