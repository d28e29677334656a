// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::BTreeMap, ops::Bound};

use tessera_core::EncodedKey;

use crate::Direction;

pub(crate) enum Lookup<'a> {
	Written(&'a Vec<u8>),
	Deleted,
	Untouched,
}

/// Uncommitted writes to one column family.
///
/// Point writes shadow deleted ranges: a range delete drops the point writes it
/// covers, and a later put inside the range is recorded as a point write.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingFamily {
	writes: BTreeMap<EncodedKey, Option<Vec<u8>>>,
	deleted_ranges: Vec<(EncodedKey, EncodedKey)>,
}

impl PendingFamily {
	pub(crate) fn put(&mut self, key: EncodedKey, value: Vec<u8>) {
		self.writes.insert(key, Some(value));
	}

	pub(crate) fn delete(&mut self, key: EncodedKey) {
		self.writes.insert(key, None);
	}

	pub(crate) fn delete_range(&mut self, begin: EncodedKey, end: EncodedKey) {
		if begin >= end {
			return;
		}
		let covered: Vec<EncodedKey> = self.writes.range(begin.clone()..end.clone()).map(|(k, _)| k.clone()).collect();
		for key in covered {
			self.writes.remove(&key);
		}
		self.deleted_ranges.push((begin, end));
	}

	fn in_deleted_range(&self, key: &[u8]) -> bool {
		self.deleted_ranges.iter().any(|(begin, end)| begin.as_slice() <= key && key < end.as_slice())
	}

	pub(crate) fn lookup(&self, key: &[u8]) -> Lookup<'_> {
		match self.writes.get(key) {
			Some(Some(value)) => Lookup::Written(value),
			Some(None) => Lookup::Deleted,
			None if self.in_deleted_range(key) => Lookup::Deleted,
			None => Lookup::Untouched,
		}
	}

	/// Whether a committed entry under `key` is invisible through this overlay.
	pub(crate) fn hides(&self, key: &[u8]) -> bool {
		self.writes.contains_key(key) || self.in_deleted_range(key)
	}

	pub(crate) fn first_written<'a>(
		&'a self,
		range: (Bound<&[u8]>, Bound<&[u8]>),
		direction: Direction,
	) -> Option<(&'a EncodedKey, &'a Vec<u8>)> {
		let mut iter = self.writes.range::<[u8], _>(range).filter_map(|(k, v)| v.as_ref().map(|v| (k, v)));
		match direction {
			Direction::Forward => iter.next(),
			Direction::Backward => iter.next_back(),
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.writes.len() + self.deleted_ranges.len()
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.writes.is_empty() && self.deleted_ranges.is_empty()
	}

	pub(crate) fn apply_to(&self, data: &mut BTreeMap<EncodedKey, Vec<u8>>) {
		for (begin, end) in &self.deleted_ranges {
			let covered: Vec<EncodedKey> = data.range(begin.clone()..end.clone()).map(|(k, _)| k.clone()).collect();
			for key in covered {
				data.remove(&key);
			}
		}
		for (key, value) in &self.writes {
			match value {
				Some(value) => {
					data.insert(key.clone(), value.clone());
				}
				None => {
					data.remove(key);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use tessera_core::EncodedKey;

	use super::{Lookup, PendingFamily};

	fn key(b: &[u8]) -> EncodedKey {
		EncodedKey::new(b.to_vec())
	}

	#[test]
	fn test_put_after_range_delete_survives() {
		let mut pending = PendingFamily::default();
		pending.put(key(b"b"), b"1".to_vec());
		pending.delete_range(key(b"a"), key(b"c"));
		assert!(matches!(pending.lookup(b"b"), Lookup::Deleted));

		pending.put(key(b"b"), b"2".to_vec());
		assert!(matches!(pending.lookup(b"b"), Lookup::Written(v) if v == b"2"));

		let mut data = BTreeMap::new();
		data.insert(key(b"a"), vec![]);
		data.insert(key(b"b"), vec![]);
		data.insert(key(b"c"), vec![]);
		pending.apply_to(&mut data);
		assert_eq!(data.keys().cloned().collect::<Vec<_>>(), vec![key(b"b"), key(b"c")]);
		assert_eq!(data.get(b"b".as_slice()), Some(&b"2".to_vec()));
	}

	#[test]
	fn test_hides() {
		let mut pending = PendingFamily::default();
		pending.delete(key(b"x"));
		pending.delete_range(key(b"m"), key(b"n"));
		assert!(pending.hides(b"x"));
		assert!(pending.hides(b"m1"));
		assert!(!pending.hides(b"n"));
		assert!(matches!(pending.lookup(b"z"), Lookup::Untouched));
	}

	#[test]
	fn test_empty_range_ignored() {
		let mut pending = PendingFamily::default();
		pending.delete_range(key(b"b"), key(b"a"));
		assert!(pending.is_empty());
	}
}
