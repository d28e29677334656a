// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use tessera_core::{
	Error, Result, SchemaError,
	interface::catalog::{TableDef, TableId},
};
use tessera_type::Type;

use crate::Catalog;

impl Catalog {
	/// Checks that the descriptors agree with each other: unique table and
	/// field names, ids below their counters, index fields that exist and
	/// foreign keys that point at declared tables.
	pub fn check_integrity(&self) -> Result<()> {
		let tables = self.tables.read();

		let mut names = HashSet::new();
		let mut ids = HashSet::new();
		for table in tables.iter() {
			if !names.insert((table.namespace.as_str(), table.name.as_str())) {
				return Err(inconsistent(format!("table `{}` is declared twice", table.qualified_name())));
			}
			if !ids.insert(table.id) {
				return Err(inconsistent(format!("table id {} is used twice", table.id)));
			}
		}

		for table in tables.iter() {
			check_table(table, &ids)?;
		}
		Ok(())
	}
}

fn check_table(table: &TableDef, table_ids: &HashSet<TableId>) -> Result<()> {
	let name = table.qualified_name();

	let mut field_names = HashSet::new();
	let mut field_ids = HashSet::new();
	for field in &table.fields {
		if !field_names.insert(field.name.as_str()) {
			return Err(inconsistent(format!("field `{}` of `{name}` is declared twice", field.name)));
		}
		if !field_ids.insert(field.id) || field.id.0 >= table.next_field_id {
			return Err(inconsistent(format!("field id {} of `{name}` is not unique", field.id)));
		}
		if let Some(foreign) = field.foreign_table {
			if !table_ids.contains(&foreign) {
				return Err(inconsistent(format!(
					"field `{}` of `{name}` references missing table {foreign}",
					field.name
				)));
			}
			if field.ty != Type::Integer {
				return Err(inconsistent(format!("foreign key `{}` of `{name}` is not an integer", field.name)));
			}
		}
	}

	let mut index_ids = HashSet::new();
	for index in &table.indexes {
		if !index_ids.insert(index.id) || index.id.0 >= table.next_index_id {
			return Err(inconsistent(format!("index id {} of `{name}` is not unique", index.id)));
		}
		if let Some(missing) = index.kind.fields().into_iter().find(|f| !field_ids.contains(f)) {
			return Err(inconsistent(format!("index {} of `{name}` reads missing field {missing}", index.id)));
		}
	}

	Ok(())
}

fn inconsistent(message: String) -> Error {
	SchemaError::Inconsistent(message).into()
}
