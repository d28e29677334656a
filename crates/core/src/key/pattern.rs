// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Outcome of matching one key against a [`KeyPattern`] during an ordered scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch {
	/// Prefix and every constraint hold.
	Success,
	/// Prefix holds but a constraint does not; skip the key and keep scanning.
	Continue,
	/// Prefix does not hold; the scanned region is exhausted.
	Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Postfix {
	offset: usize,
	value: Vec<u8>,
}

/// A region of the keyspace: a byte prefix plus constant bytes required at
/// fixed offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPattern {
	prefix: Vec<u8>,
	postfixes: Vec<Postfix>,
}

impl KeyPattern {
	pub fn new(prefix: impl Into<Vec<u8>>) -> Self {
		Self {
			prefix: prefix.into(),
			postfixes: Vec::new(),
		}
	}

	/// Matches every key.
	pub fn all() -> Self {
		Self::default()
	}

	pub fn with_postfix(mut self, offset: usize, value: impl Into<Vec<u8>>) -> Self {
		self.postfixes.push(Postfix {
			offset,
			value: value.into(),
		});
		self
	}

	pub fn prefix(&self) -> &[u8] {
		&self.prefix
	}

	pub fn matches(&self, key: &[u8]) -> KeyMatch {
		if !key.starts_with(&self.prefix) {
			return KeyMatch::Stop;
		}

		for postfix in &self.postfixes {
			let end = postfix.offset + postfix.value.len();
			if key.len() < end || key[postfix.offset..end] != postfix.value[..] {
				return KeyMatch::Continue;
			}
		}

		KeyMatch::Success
	}
}
