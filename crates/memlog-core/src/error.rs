// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for memlog.

use thiserror::Error;

/// The primary error type used across all memlog adapters and services.
#[derive(Debug, Error)]
pub enum MemlogError {
    /// Configuration errors, including a missing completion-service credential.
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database unavailable, query failure, constraint violation).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat platform errors (gateway failure, interaction reply rejected).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Text-completion provider errors (API failure, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MemlogError {
    /// Returns true when the error stems from missing or invalid configuration.
    ///
    /// Command handlers use this to show an actionable message instead of a
    /// generic failure.
    pub fn is_config(&self) -> bool {
        matches!(self, MemlogError::Config(_))
    }
}
