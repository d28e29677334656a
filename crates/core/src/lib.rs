// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use config::DatabaseConfig;
pub use error::{CorruptionError, Error, ForeignDependencyError, SchemaError};
pub use key::{EncodableKey, EncodedKey, KeyMatch, KeyPattern};
pub use record::Record;
pub use sort::SortDirection;

mod config;
pub mod encoding;
mod error;
pub mod hash;
pub mod interface;
pub mod key;
pub mod lexeme;
mod record;
mod sort;

pub type Result<T> = std::result::Result<T, Error>;
