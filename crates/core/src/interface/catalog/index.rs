// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::interface::catalog::{FieldId, IndexId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
	pub id: IndexId,
	#[serde(flatten)]
	pub kind: IndexKind,
}

/// Shape of a secondary index. Hashed field lists are kept sorted by field id,
/// which fixes the component order of every key the index writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexKind {
	Hash {
		fields: Vec<FieldId>,
	},
	Prefix {
		fields: Vec<FieldId>,
	},
	Interval {
		hashed: Vec<FieldId>,
		indexed: FieldId,
	},
	Range {
		hashed: Vec<FieldId>,
		begin: FieldId,
		end: FieldId,
	},
}

impl IndexKind {
	pub fn name(&self) -> &'static str {
		match self {
			IndexKind::Hash {
				..
			} => "hash",
			IndexKind::Prefix {
				..
			} => "prefix",
			IndexKind::Interval {
				..
			} => "interval",
			IndexKind::Range {
				..
			} => "range",
		}
	}

	/// Fields contributing hash components to the key.
	pub fn hashed(&self) -> &[FieldId] {
		match self {
			IndexKind::Hash {
				fields,
			} => fields,
			IndexKind::Prefix {
				..
			} => &[],
			IndexKind::Interval {
				hashed,
				..
			}
			| IndexKind::Range {
				hashed,
				..
			} => hashed,
		}
	}

	/// Every field the index reads.
	pub fn fields(&self) -> Vec<FieldId> {
		match self {
			IndexKind::Hash {
				fields,
			}
			| IndexKind::Prefix {
				fields,
			} => fields.clone(),
			IndexKind::Interval {
				hashed,
				indexed,
			} => {
				let mut result = hashed.clone();
				result.push(*indexed);
				result
			}
			IndexKind::Range {
				hashed,
				begin,
				end,
			} => {
				let mut result = hashed.clone();
				result.push(*begin);
				result.push(*end);
				result
			}
		}
	}

	pub fn contains(&self, field: FieldId) -> bool {
		self.fields().contains(&field)
	}

	/// Sorts hashed and prefix field lists so equal shapes compare equal.
	pub fn normalized(mut self) -> Self {
		match &mut self {
			IndexKind::Hash {
				fields,
			}
			| IndexKind::Prefix {
				fields,
			} => {
				fields.sort();
				fields.dedup();
			}
			IndexKind::Interval {
				hashed,
				..
			}
			| IndexKind::Range {
				hashed,
				..
			} => {
				hashed.sort();
				hashed.dedup();
			}
		}
		self
	}
}
