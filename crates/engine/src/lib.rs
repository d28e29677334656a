// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use engine::{Engine, EngineInner};
pub use execute::{
	catalog::Schema,
	query::{Filter, HashFilter, IdFilter, IntervalFilter, PrefixFilter, Query, RangeFilter, RecordCursor},
};
pub use transaction::CommandTransaction;

mod engine;
pub(crate) mod execute;
mod index;
#[cfg(test)]
mod test_utils;
mod transaction;

pub use tessera_core::Result;
