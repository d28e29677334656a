// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	Result, SchemaError,
	interface::catalog::{FieldDef, IndexDef, TableId},
};
use tessera_type::Type;
use tracing::debug;

use crate::{Catalog, FieldToCreate};

impl Catalog {
	/// Declares a field with a fresh id. A foreign key field must be an
	/// integer and its target table must exist.
	pub fn add_field(&self, table: TableId, field: &FieldToCreate) -> Result<FieldDef> {
		let mut tables = self.tables.write();

		let foreign_table = match &field.foreign_key {
			Some(foreign) => {
				let target = tables
					.iter()
					.find(|t| t.namespace == foreign.namespace && t.name == foreign.table)
					.ok_or_else(|| SchemaError::TableNotFound {
						namespace: foreign.namespace.clone(),
						name: foreign.table.clone(),
					})?;
				if field.ty != Type::Integer {
					return Err(SchemaError::TypeMismatch {
						field: field.name.clone(),
						expected: Type::Integer,
						found: field.ty,
					}
					.into());
				}
				Some(target.id)
			}
			None => None,
		};

		let table = tables
			.iter_mut()
			.find(|t| t.id == table)
			.ok_or_else(|| SchemaError::Inconsistent(format!("table {table} is not in the catalog")))?;

		if table.field(&field.name).is_some() {
			return Err(SchemaError::FieldAlreadyExists {
				table: table.qualified_name(),
				field: field.name.clone(),
			}
			.into());
		}

		let def = FieldDef {
			id: table.allocate_field_id(),
			name: field.name.clone(),
			ty: field.ty,
			foreign_table,
		};
		debug!(table = %table.qualified_name(), field = %def.name, id = %def.id, "field declared");
		table.fields.push(def.clone());
		Ok(def)
	}

	/// Removes a field together with every index reading it.
	pub fn remove_field(&self, table: TableId, name: &str) -> Result<Option<(FieldDef, Vec<IndexDef>)>> {
		self.with_table_mut(table, |table| {
			let Some(position) = table.fields.iter().position(|f| f.name == name) else {
				return Ok(None);
			};
			let field = table.fields.remove(position);

			let (dropped, kept): (Vec<_>, Vec<_>) =
				table.indexes.drain(..).partition(|index| index.kind.contains(field.id));
			table.indexes = kept;

			debug!(table = %table.qualified_name(), field = name, indexes = dropped.len(), "field removed");
			Ok(Some((field, dropped)))
		})
	}

	/// Returns `false` when the table has no field called `old`.
	pub fn rename_field(&self, table: TableId, old: &str, new: &str) -> Result<bool> {
		self.with_table_mut(table, |table| {
			if old != new && table.field(new).is_some() {
				return Err(SchemaError::FieldAlreadyExists {
					table: table.qualified_name(),
					field: new.to_string(),
				}
				.into());
			}
			match table.fields.iter_mut().find(|f| f.name == old) {
				Some(field) => {
					field.name = new.to_string();
					debug!(old, new, "field renamed");
					Ok(true)
				}
				None => Ok(false),
			}
		})
	}
}
