// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera::{
	Database, Error, FieldId, HashFilter, IndexToCreate, Memory, PrefixFilter, Query,
	core::{
		EncodableKey,
		interface::catalog::IndexKind,
		key::{IndexKeyRange, RecordKey},
	},
	embedded,
	store::{Entry, StoreRead},
};
use tessera_testing::{fixture, init_tracing};

fn populated(store: Memory) -> Database {
	init_tracing();
	let db = embedded::open(store).with_table(fixture::file()).build().unwrap();
	db.execute_transactional(|txn| {
		for (name, size) in [("Test file", 10), ("second draft", 20), ("final notes", 10), ("archive", 5)] {
			let mut record = txn.create("file", "app")?;
			record.set(FieldId(1), name).set(FieldId(2), size);
			txn.save(&record)?;
		}
		Ok(())
	})
	.unwrap();
	db
}

fn entries(db: &Database, column_family: &str) -> Vec<Entry> {
	db.store().cursor(column_family).unwrap().collect()
}

#[test]
fn test_reopen_rebuilds_lost_indexes() {
	let store = Memory::new();
	let db = populated(store.clone());
	let table = db.schema().get_table("file", "app").unwrap();
	let maintained = entries(&db, &table.index_column_family());
	assert!(!maintained.is_empty());
	drop(db);

	assert!(store.drop_column_family(&table.index_column_family()));

	let db = embedded::open(store).with_table(fixture::file()).build().unwrap();
	assert_eq!(entries(&db, &table.index_column_family()), maintained);
	assert_eq!(db.select("file", "app", HashFilter::new().with("size", 10)).unwrap().count(), 2);
	assert_eq!(db.select("file", "app", PrefixFilter::new(&["name"], "fin")).unwrap().count(), 1);
}

#[test]
fn test_reopen_refuses_lost_records() {
	let store = Memory::new();
	let db = populated(store.clone());
	let table = db.schema().get_table("file", "app").unwrap();
	drop(db);

	store.drop_column_family(&table.data_column_family());
	let err = embedded::open(store.clone()).build().err().unwrap();
	assert!(matches!(err, Error::ColumnFamilyNotFound(cf) if cf == table.data_column_family()));

	// without the check the schema still opens
	let db = embedded::open(store).with_integrity_check(false).build().unwrap();
	assert!(db.schema().table("file", "app").is_some());
}

#[test]
fn test_reopen_refuses_stray_column_family() {
	let store = Memory::new();
	drop(populated(store.clone()));
	store.create_column_family("app.t42").unwrap();

	let err = embedded::open(store).build().err().unwrap();
	assert!(matches!(err, Error::InconsistentDatabase(message) if message.contains("app.t42")));
}

#[test]
fn test_drop_index_clears_its_keys() {
	let db = populated(Memory::new());
	let table = db.schema().get_table("file", "app").unwrap();
	let prefix = table.indexes.iter().find(|i| matches!(i.kind, IndexKind::Prefix { .. })).unwrap();
	let range = IndexKeyRange::of(prefix.id);
	let in_range = |db: &Database| {
		entries(db, &table.index_column_family()).into_iter().filter(|e| e.key >= range.start && e.key < range.end).count()
	};
	assert!(in_range(&db) > 0);

	let others_before = entries(&db, &table.index_column_family()).len() - in_range(&db);
	assert!(db.schema().drop_index("file", "app", IndexToCreate::prefix(&["name"])).unwrap());

	assert_eq!(in_range(&db), 0);
	assert_eq!(entries(&db, &table.index_column_family()).len(), others_before);
	assert!(db.select("file", "app", PrefixFilter::new(&["name"], "fin")).is_err());
	db.schema().check_integrity().unwrap();
}

#[test]
fn test_drop_field_clears_its_keys() {
	let db = populated(Memory::new());
	let table = db.schema().get_table("file", "app").unwrap();
	let ids: Vec<_> = db.select("file", "app", Query::all()).unwrap().map(|r| r.unwrap().id()).collect();

	assert!(db.schema().drop_field("file", "app", "name").unwrap());

	for id in &ids {
		let key = RecordKey::Field(*id, FieldId(1)).encode();
		assert!(db.store().get(&table.data_column_family(), &key).unwrap().is_none());
	}
	for index in table.indexes.iter().filter(|i| i.kind.contains(FieldId(1))) {
		let range = IndexKeyRange::of(index.id);
		assert!(
			entries(&db, &table.index_column_family())
				.iter()
				.all(|e| e.key < range.start || e.key >= range.end)
		);
	}
	assert_eq!(db.select("file", "app", HashFilter::new().with("size", 10)).unwrap().count(), 2);
	db.schema().check_integrity().unwrap();
}
