// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::{DatabaseConfig, interface::catalog::TableDef};
use tessera_store::Memory;
use tessera_type::Type;

use crate::{Catalog, FieldToCreate, IndexToCreate};

pub fn create_test_catalog() -> Catalog {
	Catalog::create(Memory::new(), DatabaseConfig::default()).unwrap()
}

/// Declares a table with plain fields in the catalog only; no column family
/// is created.
pub fn create_table(catalog: &Catalog, namespace: &str, table: &str, fields: &[(&str, Type)]) -> TableDef {
	let def = catalog.new_table(namespace, table).unwrap();
	for (name, ty) in fields {
		catalog.add_field(def.id, &FieldToCreate::new(*name, *ty)).unwrap();
	}
	catalog.table_by_id(def.id).unwrap()
}

pub fn create_index(catalog: &Catalog, table: &TableDef, index: IndexToCreate) -> TableDef {
	catalog.add_index(table.id, &index).unwrap();
	catalog.table_by_id(table.id).unwrap()
}
