// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub const SEQUENCE_BLOCK_SIZE: u64 = 10;
pub const SERVICE_COLUMN_FAMILY: &str = "service";
pub const SEQUENCE_COLUMN_FAMILY: &str = "sequence";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
	/// Ids a sequence reserves per durable write.
	pub sequence_block_size: u64,
	/// Column family holding the schema version and document.
	pub service_column_family: String,
	/// Column family holding one high-water mark per sequence.
	pub sequence_column_family: String,
}

impl DatabaseConfig {
	pub fn new() -> Self {
		Self {
			sequence_block_size: SEQUENCE_BLOCK_SIZE,
			service_column_family: SERVICE_COLUMN_FAMILY.to_string(),
			sequence_column_family: SEQUENCE_COLUMN_FAMILY.to_string(),
		}
	}

	pub fn with_sequence_block_size(mut self, size: u64) -> Self {
		self.sequence_block_size = size.max(1);
		self
	}

	pub fn with_service_column_family(mut self, name: impl Into<String>) -> Self {
		self.service_column_family = name.into();
		self
	}

	pub fn with_sequence_column_family(mut self, name: impl Into<String>) -> Self {
		self.sequence_column_family = name.into();
		self
	}

	/// Whether a column family is reserved for internal use.
	pub fn is_reserved(&self, column_family: &str) -> bool {
		column_family == self.service_column_family || column_family == self.sequence_column_family
	}
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::DatabaseConfig;

	#[test]
	fn test_defaults() {
		let config = DatabaseConfig::default();
		assert_eq!(config.sequence_block_size, 10);
		assert_eq!(config.service_column_family, "service");
		assert_eq!(config.sequence_column_family, "sequence");
		assert!(config.is_reserved("service"));
		assert!(!config.is_reserved("app.t1"));
	}

	#[test]
	fn test_block_size_at_least_one() {
		assert_eq!(DatabaseConfig::new().with_sequence_block_size(0).sequence_block_size, 1);
	}
}
