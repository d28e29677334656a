// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use once_cell::sync::Lazy;
use tessera_core::{DatabaseConfig, EncodedKey, Error, Result, SchemaError, interface::catalog::TableDef};
use tessera_store::{Memory, StoreRead};
use tracing::{debug, instrument};

pub const CURRENT_VERSION: &str = "1.0.0";

static VERSION_KEY: Lazy<EncodedKey> = Lazy::new(|| EncodedKey::new("version"));
static SCHEMA_KEY: Lazy<EncodedKey> = Lazy::new(|| EncodedKey::new("schema"));

/// Persists the catalog as one versioned document: a version key and a schema
/// key holding every table descriptor as JSON, both in the service column
/// family. The two keys are always written together.
pub struct CatalogStore {}

impl CatalogStore {
	pub fn exists(store: &Memory, config: &DatabaseConfig) -> bool {
		store.contains_column_family(&config.service_column_family)
	}

	#[instrument(name = "catalog::store::create", level = "debug", skip_all)]
	pub fn create(store: &Memory, config: &DatabaseConfig) -> Result<()> {
		let service = &config.service_column_family;
		if !store.contains_column_family(service) {
			store.create_column_family(service)?;
		}

		if store.get(service, &VERSION_KEY)?.is_some() || store.get(service, &SCHEMA_KEY)?.is_some() {
			return Err(SchemaError::AlreadyExists.into());
		}

		Self::save(store, config, &[])
	}

	#[instrument(name = "catalog::store::load", level = "debug", skip_all)]
	pub fn load(store: &Memory, config: &DatabaseConfig) -> Result<Vec<TableDef>> {
		let service = &config.service_column_family;
		if !store.contains_column_family(service) {
			return Err(SchemaError::NotFound.into());
		}

		let version = store.get(service, &VERSION_KEY)?;
		let schema = store.get(service, &SCHEMA_KEY)?;

		let (version, schema) = match (version, schema) {
			(None, None) => return Err(SchemaError::NotFound.into()),
			(Some(_), None) => return Err(SchemaError::Corrupted("schema key is missing".to_string()).into()),
			(None, Some(_)) => return Err(SchemaError::Corrupted("version key is missing".to_string()).into()),
			(Some(version), Some(schema)) => (version, schema),
		};

		let version = String::from_utf8(version)
			.map_err(|_| Error::from(SchemaError::Corrupted("version is not valid utf-8".to_string())))?;
		if version != CURRENT_VERSION {
			return Err(SchemaError::VersionMismatch {
				expected: CURRENT_VERSION.to_string(),
				found: version,
			}
			.into());
		}

		let tables: Vec<TableDef> =
			serde_json::from_slice(&schema).map_err(|err| SchemaError::Corrupted(err.to_string()))?;
		debug!(tables = tables.len(), "catalog loaded");
		Ok(tables)
	}

	pub fn save(store: &Memory, config: &DatabaseConfig, tables: &[TableDef]) -> Result<()> {
		let document = serde_json::to_vec(tables).map_err(|err| SchemaError::Corrupted(err.to_string()))?;

		let service = &config.service_column_family;
		let mut txn = store.begin();
		txn.put(service, VERSION_KEY.clone(), CURRENT_VERSION.as_bytes().to_vec())?;
		txn.put(service, SCHEMA_KEY.clone(), document)?;
		txn.commit()
	}
}
