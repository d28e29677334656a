// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Bound, sync::Arc};

use tessera_core::{EncodedKey, KeyMatch, KeyPattern};

use crate::{memory::Family, transaction::PendingFamily};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	pub key: EncodedKey,
	pub value: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Forward,
	Backward,
}

/// Ordered, bidirectional cursor over one column family.
///
/// The cursor owns its view, so it stays valid while the store or the
/// transaction it came from keeps changing. Once closed, every positioning
/// call returns `None`.
pub struct StoreCursor {
	column_family: String,
	family: Option<Family>,
	pending: Option<Arc<PendingFamily>>,
	position: Option<EncodedKey>,
	positioned: bool,
}

impl StoreCursor {
	pub(crate) fn new(column_family: &str, family: Family, pending: Option<Arc<PendingFamily>>) -> Self {
		Self {
			column_family: column_family.to_string(),
			family: Some(family),
			pending,
			position: None,
			positioned: false,
		}
	}

	pub fn column_family(&self) -> &str {
		&self.column_family
	}

	/// Positions on the first entry whose key is at least `key`.
	pub fn seek(&mut self, key: &[u8]) -> Option<Entry> {
		self.position_on(Bound::Included(key), Direction::Forward)
	}

	/// Positions on the last entry whose key is at most `key`.
	pub fn seek_reverse(&mut self, key: &[u8]) -> Option<Entry> {
		self.position_on(Bound::Included(key), Direction::Backward)
	}

	/// Positions on the first entry matching `pattern`, skipping entries whose
	/// postfix constraints fail. Returns `None` once the prefix stops matching.
	pub fn seek_pattern(&mut self, pattern: &KeyPattern) -> Option<Entry> {
		let entry = self.seek(pattern.prefix())?;
		self.settle(entry, pattern)
	}

	/// Steps forward to the next entry matching `pattern`.
	pub fn next_matching(&mut self, pattern: &KeyPattern) -> Option<Entry> {
		let entry = self.step(Direction::Forward)?;
		self.settle(entry, pattern)
	}

	fn settle(&mut self, mut entry: Entry, pattern: &KeyPattern) -> Option<Entry> {
		loop {
			match pattern.matches(&entry.key) {
				KeyMatch::Success => return Some(entry),
				KeyMatch::Continue => entry = self.step(Direction::Forward)?,
				KeyMatch::Stop => return None,
			}
		}
	}

	/// Moves one entry in `direction`. An unpositioned cursor starts at the
	/// respective end of the column family; an exhausted one stays exhausted
	/// until the next seek.
	pub fn step(&mut self, direction: Direction) -> Option<Entry> {
		let position = self.position.take();
		match &position {
			Some(key) => self.position_on(Bound::Excluded(key.as_slice()), direction),
			None if self.positioned => None,
			None => self.position_on(Bound::Unbounded, direction),
		}
	}

	pub fn close(&mut self) {
		self.family = None;
		self.pending = None;
		self.position = None;
	}

	pub fn is_closed(&self) -> bool {
		self.family.is_none()
	}

	fn position_on(&mut self, from: Bound<&[u8]>, direction: Direction) -> Option<Entry> {
		let entry = self.find_entry(from, direction);
		self.positioned = true;
		self.position = entry.as_ref().map(|e| e.key.clone());
		entry
	}

	fn find_entry(&self, from: Bound<&[u8]>, direction: Direction) -> Option<Entry> {
		let family = self.family.as_ref()?;
		let pending = self.pending.as_deref();
		let range = match direction {
			Direction::Forward => (from, Bound::Unbounded),
			Direction::Backward => (Bound::Unbounded, from),
		};

		let visible = |key: &EncodedKey| pending.is_none_or(|p| !p.hides(key));
		let committed = match direction {
			Direction::Forward => family.range::<[u8], _>(range).find(|(k, _)| visible(k)),
			Direction::Backward => family.range::<[u8], _>(range).rev().find(|(k, _)| visible(k)),
		};
		let written = pending.and_then(|p| p.first_written(range, direction));

		let pick = match (committed, written) {
			(Some(c), Some(w)) => {
				let committed_first = match direction {
					Direction::Forward => c.0 < w.0,
					Direction::Backward => c.0 > w.0,
				};
				if committed_first {
					c
				} else {
					w
				}
			}
			(Some(c), None) => c,
			(None, Some(w)) => w,
			(None, None) => return None,
		};

		Some(Entry {
			key: pick.0.clone(),
			value: pick.1.clone(),
		})
	}
}

impl Iterator for StoreCursor {
	type Item = Entry;

	fn next(&mut self) -> Option<Self::Item> {
		self.step(Direction::Forward)
	}
}

impl Drop for StoreCursor {
	fn drop(&mut self) {
		self.close();
	}
}
