// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub(crate) mod catalog;
pub(crate) mod mutate;
pub(crate) mod query;
