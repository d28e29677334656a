// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub use field::FieldDef;
pub use id::*;
pub use index::{IndexDef, IndexKind};
pub use table::TableDef;

mod field;
mod id;
mod index;
mod table;
