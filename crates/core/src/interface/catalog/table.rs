// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::interface::catalog::{FieldDef, FieldId, IndexDef, IndexId, IndexKind, TableId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
	pub id: TableId,
	pub namespace: String,
	pub name: String,
	pub fields: Vec<FieldDef>,
	pub indexes: Vec<IndexDef>,
	pub next_field_id: u32,
	pub next_index_id: u64,
}

impl TableDef {
	pub fn new(id: TableId, namespace: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id,
			namespace: namespace.into(),
			name: name.into(),
			fields: Vec::new(),
			indexes: Vec::new(),
			next_field_id: 1,
			next_index_id: 1,
		}
	}

	pub fn qualified_name(&self) -> String {
		format!("{}.{}", self.namespace, self.name)
	}

	/// Column family holding the records; stable across renames.
	pub fn data_column_family(&self) -> String {
		format!("{}.t{}", self.namespace, self.id)
	}

	/// Column family shared by every secondary index of the table.
	pub fn index_column_family(&self) -> String {
		format!("{}.t{}.index", self.namespace, self.id)
	}

	pub fn sequence_name(&self) -> String {
		self.data_column_family()
	}

	pub fn field(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn field_by_id(&self, id: FieldId) -> Option<&FieldDef> {
		self.fields.iter().find(|f| f.id == id)
	}

	pub fn index(&self, id: IndexId) -> Option<&IndexDef> {
		self.indexes.iter().find(|i| i.id == id)
	}

	pub fn index_by_kind(&self, kind: &IndexKind) -> Option<&IndexDef> {
		self.indexes.iter().find(|i| &i.kind == kind)
	}

	pub fn indexes_with_field(&self, field: FieldId) -> impl Iterator<Item = &IndexDef> {
		self.indexes.iter().filter(move |i| i.kind.contains(field))
	}

	pub fn field_names(&self, ids: &[FieldId]) -> Vec<String> {
		ids.iter().map(|id| self.field_by_id(*id).map(|f| f.name.clone()).unwrap_or_else(|| id.to_string())).collect()
	}

	/// Human readable form of an index, e.g. `hash(name, size)`.
	pub fn describe_index(&self, kind: &IndexKind) -> String {
		format!("{}({})", kind.name(), self.field_names(&kind.fields()).join(", "))
	}

	/// The hash index a foreign key field implies.
	pub fn is_foreign_key_index(&self, kind: &IndexKind) -> bool {
		match kind {
			IndexKind::Hash {
				fields,
			} if fields.len() == 1 => self.field_by_id(fields[0]).is_some_and(FieldDef::is_foreign_key),
			_ => false,
		}
	}

	pub fn allocate_field_id(&mut self) -> FieldId {
		let id = FieldId(self.next_field_id);
		self.next_field_id += 1;
		id
	}

	pub fn allocate_index_id(&mut self) -> IndexId {
		let id = IndexId(self.next_index_id);
		self.next_index_id += 1;
		id
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::Type;

	use super::TableDef;
	use crate::interface::catalog::{FieldDef, FieldId, IndexDef, IndexId, IndexKind, TableId};

	fn table() -> TableDef {
		let mut table = TableDef::new(TableId(3), "app", "file");
		let name = table.allocate_field_id();
		let folder = table.allocate_field_id();
		table.fields.push(FieldDef {
			id: name,
			name: "name".to_string(),
			ty: Type::String,
			foreign_table: None,
		});
		table.fields.push(FieldDef {
			id: folder,
			name: "folder".to_string(),
			ty: Type::Integer,
			foreign_table: Some(TableId(2)),
		});
		let index = table.allocate_index_id();
		table.indexes.push(IndexDef {
			id: index,
			kind: IndexKind::Hash {
				fields: vec![folder],
			},
		});
		table
	}

	#[test]
	fn test_column_families() {
		let table = table();
		assert_eq!(table.data_column_family(), "app.t3");
		assert_eq!(table.index_column_family(), "app.t3.index");
		assert_eq!(table.sequence_name(), "app.t3");
		assert_eq!(table.qualified_name(), "app.file");
	}

	#[test]
	fn test_lookup() {
		let table = table();
		assert_eq!(table.field("folder").unwrap().id, FieldId(2));
		assert!(table.field("missing").is_none());
		assert_eq!(table.index(IndexId(1)).unwrap().kind.name(), "hash");
		assert_eq!(table.indexes_with_field(FieldId(2)).count(), 1);
		assert_eq!(table.indexes_with_field(FieldId(1)).count(), 0);
	}

	#[test]
	fn test_foreign_key_index() {
		let table = table();
		assert!(table.is_foreign_key_index(&IndexKind::Hash {
			fields: vec![FieldId(2)]
		}));
		assert!(!table.is_foreign_key_index(&IndexKind::Hash {
			fields: vec![FieldId(1)]
		}));
		assert_eq!(
			table.describe_index(&IndexKind::Hash {
				fields: vec![FieldId(1), FieldId(2)]
			}),
			"hash(name, folder)"
		);
	}

	#[test]
	fn test_ids_are_not_reused() {
		let mut table = table();
		table.fields.clear();
		assert_eq!(table.allocate_field_id(), FieldId(3));
		assert_eq!(table.allocate_index_id(), IndexId(2));
	}
}
