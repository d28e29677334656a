// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Table definitions the tests keep coming back to.

use tessera_catalog::{FieldToCreate, IndexToCreate, TableToCreate};
use tessera_type::Type;

pub const NAMESPACE: &str = "app";

/// `app.file(name: String, size: Integer)` with hash indexes on each field,
/// a prefix index on the name and an interval index on the size.
pub fn file() -> TableToCreate {
	TableToCreate::new(NAMESPACE, "file")
		.with_field(FieldToCreate::new("name", Type::String))
		.with_field(FieldToCreate::new("size", Type::Integer))
		.with_index(IndexToCreate::hash(&["size"]))
		.with_index(IndexToCreate::hash(&["name"]))
		.with_index(IndexToCreate::prefix(&["name"]))
		.with_index(IndexToCreate::interval(&[], "size"))
}

/// `app.folder(name: String)`.
pub fn folder() -> TableToCreate {
	TableToCreate::new(NAMESPACE, "folder").with_field(FieldToCreate::new("name", Type::String))
}

/// `app.file(name: String, folder -> app.folder)`. Create [`folder`] first.
pub fn file_in_folder() -> TableToCreate {
	TableToCreate::new(NAMESPACE, "file")
		.with_field(FieldToCreate::new("name", Type::String))
		.with_field(FieldToCreate::foreign("folder", NAMESPACE, "folder"))
}

/// `app.booking(room: String, from: Integer, until: Integer)` with a range
/// index over `[from, until]`, alone and scoped by room.
pub fn booking() -> TableToCreate {
	TableToCreate::new(NAMESPACE, "booking")
		.with_field(FieldToCreate::new("room", Type::String))
		.with_field(FieldToCreate::new("from", Type::Integer))
		.with_field(FieldToCreate::new("until", Type::Integer))
		.with_index(IndexToCreate::range(&[], "from", "until"))
		.with_index(IndexToCreate::range(&["room"], "from", "until"))
}
