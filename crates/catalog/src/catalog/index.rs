// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	Result, SchemaError,
	interface::catalog::{IndexDef, IndexKind, TableId},
};
use tracing::debug;

use crate::{Catalog, IndexAddition, IndexToCreate};

impl Catalog {
	/// Declares an index. Declaring the implicit hash index of a foreign key
	/// again is tolerated; any other duplicate is an error.
	pub fn add_index(&self, table: TableId, index: &IndexToCreate) -> Result<IndexAddition> {
		self.with_table_mut(table, |table| {
			let kind = index.resolve(table)?;

			if let Some(existing) = table.index_by_kind(&kind) {
				if table.is_foreign_key_index(&kind) {
					return Ok(IndexAddition::ForeignKeyIndex(existing.clone()));
				}
				return Err(SchemaError::IndexAlreadyExists {
					table: table.qualified_name(),
					index: table.describe_index(&kind),
				}
				.into());
			}

			let def = IndexDef {
				id: table.allocate_index_id(),
				kind,
			};
			debug!(table = %table.qualified_name(), index = %table.describe_index(&def.kind), id = %def.id, "index declared");
			table.indexes.push(def.clone());
			Ok(IndexAddition::Added(def))
		})
	}

	pub fn remove_index(&self, table: TableId, kind: &IndexKind) -> Result<Option<IndexDef>> {
		self.with_table_mut(table, |table| {
			let Some(position) = table.indexes.iter().position(|i| &i.kind == kind) else {
				return Ok(None);
			};
			let index = table.indexes.remove(position);
			debug!(table = %table.qualified_name(), id = %index.id, "index removed");
			Ok(Some(index))
		})
	}
}
