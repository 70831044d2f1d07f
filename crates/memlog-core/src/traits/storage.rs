// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the memory store.

use async_trait::async_trait;

use crate::error::MemlogError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{FtsQuery, Memory, SearchResults};

/// Adapter owning the memory record table and its full-text index.
///
/// Every mutation updates the record and its index entry as one atomic
/// unit. No other component writes to either.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Ensures schema, index and sync triggers exist. Safe to call repeatedly.
    async fn initialize(&self) -> Result<(), MemlogError>;

    /// Flushes pending writes and releases the connection.
    async fn close(&self) -> Result<(), MemlogError>;

    /// Stores a memory stamped with the current UTC time and returns its id.
    async fn add_memory(
        &self,
        user_id: &str,
        content: &str,
        channel_id: Option<&str>,
    ) -> Result<i64, MemlogError>;

    /// Ranked full-text search, degrading to a substring scan when the
    /// engine rejects the expression.
    async fn search_memories(
        &self,
        query: &FtsQuery,
        limit: usize,
    ) -> Result<SearchResults, MemlogError>;

    /// Most recently created memories, newest first.
    async fn recent_memories(&self, limit: usize) -> Result<Vec<Memory>, MemlogError>;

    /// Total number of stored memories across all users.
    async fn memory_count(&self) -> Result<u64, MemlogError>;

    /// Fetches a single memory by id.
    async fn get_memory(&self, id: i64) -> Result<Option<Memory>, MemlogError>;

    /// Replaces a memory's content and re-indexes it. Returns false if the id is unknown.
    async fn update_memory_content(&self, id: i64, content: &str) -> Result<bool, MemlogError>;

    /// Removes a memory and its index entry. Returns false if the id is unknown.
    async fn delete_memory(&self, id: i64) -> Result<bool, MemlogError>;
}
