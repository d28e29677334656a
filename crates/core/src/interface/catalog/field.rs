// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tessera_type::Type;

use crate::interface::catalog::{FieldId, TableId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
	pub id: FieldId,
	pub name: String,
	#[serde(rename = "type")]
	pub ty: Type,
	/// Target table of a foreign key; the field then stores record ids.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub foreign_table: Option<TableId>,
}

impl FieldDef {
	pub fn is_foreign_key(&self) -> bool {
		self.foreign_table.is_some()
	}
}
