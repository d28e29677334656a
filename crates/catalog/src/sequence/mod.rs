// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tessera_core::{EncodedKey, Error, Result};
use tessera_store::{Memory, StoreRead};
use tracing::{debug, instrument};

mod registry;

pub use registry::SequenceRegistry;

/// A durable, strictly increasing id source.
///
/// Ids are handed out from an in-memory counter. The counter never passes the
/// persisted mark: before the first id of a new block is issued the mark is
/// moved `block_size` further and written to the store. After a restart the
/// sequence resumes above the last persisted mark, so ids may skip but are
/// never issued twice.
pub struct Sequence {
	name: String,
	key: EncodedKey,
	store: Memory,
	column_family: String,
	block_size: u64,
	counter: AtomicU64,
	mark: AtomicU64,
	reserve: Mutex<()>,
}

impl Sequence {
	/// Opens the sequence stored under `name` and reserves a first block.
	/// A missing mark counts as zero.
	#[instrument(name = "catalog::sequence::open", level = "debug", skip(store))]
	pub fn open(store: Memory, column_family: &str, name: &str, block_size: u64) -> Result<Self> {
		let key = EncodedKey::new(name);
		let mark = match store.get(column_family, &key)? {
			Some(bytes) => decode_mark(name, &bytes)?,
			None => 0,
		};

		let sequence = Self {
			name: name.to_string(),
			key,
			store,
			column_family: column_family.to_string(),
			block_size: block_size.max(1),
			counter: AtomicU64::new(mark),
			mark: AtomicU64::new(mark),
			reserve: Mutex::new(()),
		};
		sequence.reserve_block(mark)?;
		Ok(sequence)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The next id. Lock free unless the current block is used up.
	pub fn next(&self) -> Result<u64> {
		loop {
			let current = self.counter.load(Ordering::Acquire);
			if current >= self.mark.load(Ordering::Acquire) {
				self.extend(current)?;
				continue;
			}
			if self.counter.compare_exchange_weak(current, current + 1, Ordering::AcqRel, Ordering::Acquire).is_ok() {
				return Ok(current + 1);
			}
		}
	}

	/// The last persisted high-water mark.
	pub fn mark(&self) -> u64 {
		self.mark.load(Ordering::Acquire)
	}

	fn extend(&self, seen: u64) -> Result<()> {
		let _guard = self.reserve.lock();
		let mark = self.mark.load(Ordering::Acquire);
		if seen < mark {
			// another thread reserved a block meanwhile
			return Ok(());
		}
		self.reserve_block(mark)
	}

	fn reserve_block(&self, mark: u64) -> Result<()> {
		let next = mark.saturating_add(self.block_size);
		if next == mark {
			return Err(Error::SequenceExhausted(self.name.clone()));
		}

		self.store.put(&self.column_family, self.key.clone(), next.to_be_bytes().to_vec())?;
		self.mark.store(next, Ordering::Release);
		debug!(sequence = %self.name, mark = next, "sequence block reserved");
		Ok(())
	}
}

pub(crate) fn decode_mark(name: &str, bytes: &[u8]) -> Result<u64> {
	let bytes: [u8; 8] =
		bytes.try_into().map_err(|_| Error::InconsistentDatabase(format!("sequence `{name}` holds a malformed mark")))?;
	Ok(u64::from_be_bytes(bytes))
}
