// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Index maintenance shared by record mutation and the build service.

pub(crate) use build::build_index;
pub(crate) use entries::{index_entries, record_entries};

mod build;
mod entries;
