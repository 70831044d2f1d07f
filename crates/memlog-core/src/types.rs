// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the storage engine, recall pipeline and adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Provider,
    Storage,
}

// --- Memory types ---

/// A single logged note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// Monotonically assigned identity; never reused.
    pub id: i64,
    /// Creation instant in UTC.
    pub timestamp: DateTime<Utc>,
    /// Opaque owner identifier.
    pub user_id: String,
    /// Opaque origin context (e.g. a chat channel), if any.
    pub channel_id: Option<String>,
    /// Free-form text body.
    pub content: String,
}

/// A memory returned by a search, with a highlighted excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub memory: Memory,
    /// Matched context, at most 200 characters.
    pub snippet: String,
}

/// Outcome of a search against the storage engine.
///
/// `Degraded` means the full-text engine rejected the expression and the
/// hits come from a literal substring scan ordered newest first. Callers
/// treat both variants the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults {
    /// Hits ordered by full-text relevance, best first.
    Ranked(Vec<SearchHit>),
    /// Hits from the substring fallback, newest first.
    Degraded(Vec<SearchHit>),
}

impl SearchResults {
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchResults::Ranked(hits) | SearchResults::Degraded(hits) => hits,
        }
    }

    pub fn into_hits(self) -> Vec<SearchHit> {
        match self {
            SearchResults::Ranked(hits) | SearchResults::Degraded(hits) => hits,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SearchResults::Degraded(_))
    }

    pub fn is_empty(&self) -> bool {
        self.hits().is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits().len()
    }
}

/// A full-text query ready for the storage engine.
///
/// Carries the engine expression together with the trimmed user text the
/// expression was built from; the text drives the substring fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtsQuery {
    expression: String,
    text: String,
}

impl FtsQuery {
    pub fn new(expression: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            text: text.into(),
        }
    }

    /// The FTS5 MATCH expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The trimmed text typed by the user.
    pub fn text(&self) -> &str {
        &self.text
    }
}

// --- Provider types ---

/// A message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
}

/// A request to a text-completion provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub messages: Vec<ProviderMessage>,
    pub max_tokens: u32,
}

/// A full response from a text-completion provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub id: String,
    /// Concatenated text output.
    pub content: String,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: TokenUsage,
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
