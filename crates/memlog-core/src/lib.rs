// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for memlog.
//!
//! This crate provides the trait definitions, error type, and common types
//! shared by the storage engine, the recall pipeline and the adapters.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MemlogError;
pub use types::{
    AdapterType, FtsQuery, HealthStatus, Memory, ProviderMessage, ProviderRequest,
    ProviderResponse, SearchHit, SearchResults, TokenUsage,
};

pub use traits::{PluginAdapter, ProviderAdapter, StorageAdapter};
