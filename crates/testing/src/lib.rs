// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared helpers for tests across the workspace.

use once_cell::sync::Lazy;
use tracing_subscriber::{EnvFilter, fmt};

pub mod fixture;

static TRACING: Lazy<()> = Lazy::new(|| {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
});

/// Installs a `fmt` subscriber honouring `RUST_LOG`. Safe to call from every
/// test; only the first call has an effect.
pub fn init_tracing() {
	Lazy::force(&TRACING);
}
