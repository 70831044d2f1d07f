// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free text to FTS5 expression.

use memlog_core::FtsQuery;

/// Build a full-text query from raw user input.
///
/// Every whitespace-separated token becomes a quoted phrase and the last one
/// also gets a prefix wildcard, so `budget meet` matches "budget meeting".
/// Quotes inside a token are doubled, which keeps each token a single FTS5
/// string literal. Blank input yields `None`.
pub fn build_query(raw: &str) -> Option<FtsQuery> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let mut expression = text
        .split_whitespace()
        .map(quote_token)
        .collect::<Vec<_>>()
        .join(" ");
    expression.push('*');

    Some(FtsQuery::new(expression, text))
}

fn quote_token(token: &str) -> String {
    format!("\"{}\"", token.replace('"', "\"\""))
}
