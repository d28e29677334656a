// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Record writes of a [`crate::CommandTransaction`].

mod remove;
mod save;
