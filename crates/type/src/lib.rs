// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

pub use error::Error;
pub use value::{Type, Value, ordered};

mod error;
pub mod value;

pub type Result<T> = std::result::Result<T, Error>;
