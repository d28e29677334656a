// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Text tokenization shared by prefix indexing and prefix search.

use std::collections::BTreeSet;

/// Lowercased alphanumeric runs of `text`, deduplicated and sorted.
pub fn lexemes(text: &str) -> BTreeSet<String> {
	text.split(|c: char| !c.is_alphanumeric()).filter(|s| !s.is_empty()).map(str::to_lowercase).collect()
}

/// Whether every query lexeme is a prefix of at least one record lexeme.
pub fn contains_all_prefixes<'a>(
	query: impl IntoIterator<Item = &'a String>,
	record: &BTreeSet<String>,
) -> bool {
	query.into_iter().all(|q| record.iter().any(|lexeme| lexeme.starts_with(q.as_str())))
}
