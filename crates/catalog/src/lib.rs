// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use catalog::{Catalog, IndexAddition};
pub use create::{FieldToCreate, ForeignKey, IndexToCreate, TableToCreate};
pub use sequence::{Sequence, SequenceRegistry};
pub use store::{CURRENT_VERSION, CatalogStore};

mod catalog;
mod create;
mod sequence;
mod store;
#[cfg(test)]
pub(crate) mod test_utils;

pub use tessera_core::Result;
