// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

macro_rules! define_id {
	($(#[$meta:meta])* $name:ident($inner:ty)) => {
		$(#[$meta])*
		#[repr(transparent)]
		#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub $inner);

		impl Deref for $name {
			type Target = $inner;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}

		impl PartialEq<$inner> for $name {
			fn eq(&self, other: &$inner) -> bool {
				self.0.eq(other)
			}
		}

		impl From<$name> for $inner {
			fn from(value: $name) -> Self {
				value.0
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				Display::fmt(&self.0, f)
			}
		}
	};
}

define_id!(
	/// Stable table identifier; column family names derive from it.
	TableId(u64)
);

define_id!(
	/// Per-table field identifier, never reused.
	FieldId(u32)
);

define_id!(
	/// Per-table index identifier and the leading component of its keys.
	IndexId(u64)
);

define_id!(
	/// Record identifier issued by the table's sequence.
	RecordId(u64)
);

#[cfg(test)]
mod tests {
	use super::{FieldId, RecordId};

	#[test]
	fn test_serde_transparent() {
		assert_eq!(serde_json::to_string(&FieldId(7)).unwrap(), "7");
		assert_eq!(serde_json::from_str::<RecordId>("42").unwrap(), RecordId(42));
	}

	#[test]
	fn test_compare_with_inner() {
		assert_eq!(RecordId(3), 3);
		assert_eq!(*FieldId(2), 2u32);
	}
}
