// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{
	DatabaseConfig, Record,
	interface::catalog::{FieldDef, FieldId, TableDef, TableId},
};
use tessera_store::Memory;
use tessera_testing::{fixture, init_tracing};
use tessera_type::Type;

use crate::Engine;

impl Engine {
	/// An engine over a fresh in-memory store.
	pub fn testing() -> Self {
		init_tracing();
		Engine::new(Memory::new(), DatabaseConfig::default()).unwrap()
	}
}

/// A descriptor with plain fields numbered from 1, not backed by any store.
pub fn table_with_fields(id: TableId, fields: &[(&str, Type)]) -> TableDef {
	let mut table = TableDef::new(id, "app", "test");
	for (name, ty) in fields {
		let id = table.allocate_field_id();
		table.fields.push(FieldDef {
			id,
			name: name.to_string(),
			ty: *ty,
			foreign_table: None,
		});
	}
	table
}

/// `app.file` with `name` as field 1 and `size` as field 2.
pub fn file_table() -> (Engine, TableDef) {
	let engine = Engine::testing();
	let table = engine.schema().create_table(fixture::file()).unwrap();
	(engine, table)
}

pub fn insert_file(engine: &Engine, name: &str, size: i64) -> Record {
	engine
		.execute_transactional(|txn| {
			let mut record = txn.create("file", "app")?;
			record.set(FieldId(1), name).set(FieldId(2), size);
			txn.save(&record)?;
			Ok(record)
		})
		.unwrap()
}

/// `app.folder` and `app.file`, whose field 2 references the folder.
pub fn folder_tables() -> Engine {
	let engine = Engine::testing();
	engine.schema().create_table(fixture::folder()).unwrap();
	engine.schema().create_table(fixture::file_in_folder()).unwrap();
	engine
}
