// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::Type;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("invalid encoding for {ty}: expected {expected} bytes, found {found}")]
	InvalidLength {
		ty: Type,
		expected: usize,
		found: usize,
	},

	#[error("invalid utf-8 in stored string value")]
	InvalidUtf8,

	#[error("invalid boolean byte {0:#04x}")]
	InvalidBoolean(u8),

	#[error("type {0} has no order-preserving encoding")]
	NotOrderable(Type),

	#[error("expected a value of type {expected}, found {found}")]
	TypeMismatch {
		expected: Type,
		found: Type,
	},
}
