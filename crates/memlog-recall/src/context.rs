// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory selection and rendering for answer generation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use memlog_core::{Memory, MemlogError, StorageAdapter};
use tracing::debug;

use crate::query::build_query;

/// Most memories placed into one context block.
pub const CONTEXT_MEMORY_LIMIT: usize = 10;

/// Where the selected memories came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSource {
    /// Search hits for the question, in relevance order.
    Search,
    /// Newest memories, used when the search found nothing.
    Recent,
}

/// Context handed to the answer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryContext {
    /// Nothing has been logged yet.
    EmptyStore,
    /// Memories selected for the question and their rendered block.
    Selected {
        source: ContextSource,
        memories: Vec<Memory>,
        /// One `[#id | local date] content` line per memory.
        block: String,
    },
}

/// Selects memories for a question and renders them as a context block.
pub struct ContextAssembler {
    storage: Arc<dyn StorageAdapter>,
    zone: Tz,
}

impl ContextAssembler {
    pub fn new(storage: Arc<dyn StorageAdapter>, zone: Tz) -> Self {
        Self { storage, zone }
    }

    /// Search for the question and fall back to the newest memories when the
    /// search comes back empty.
    pub async fn build_context(&self, question: &str) -> Result<MemoryContext, MemlogError> {
        let hits = match build_query(question) {
            Some(query) => self
                .storage
                .search_memories(&query, CONTEXT_MEMORY_LIMIT)
                .await?
                .into_hits(),
            None => Vec::new(),
        };

        let (source, memories) = if hits.is_empty() {
            let recent = self.storage.recent_memories(CONTEXT_MEMORY_LIMIT).await?;
            (ContextSource::Recent, recent)
        } else {
            let memories = hits.into_iter().map(|hit| hit.memory).collect();
            (ContextSource::Search, memories)
        };

        if memories.is_empty() {
            debug!("context requested from an empty store");
            return Ok(MemoryContext::EmptyStore);
        }

        debug!(?source, selected = memories.len(), "context assembled");
        let block = render_block(&memories, self.zone);
        Ok(MemoryContext::Selected {
            source,
            memories,
            block,
        })
    }
}

/// Render a UTC instant in `zone` as `YYYY-MM-DD HH:MM`.
pub fn format_local_date(timestamp: &DateTime<Utc>, zone: Tz) -> String {
    timestamp
        .with_timezone(&zone)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn render_block(memories: &[Memory], zone: Tz) -> String {
    memories
        .iter()
        .map(|m| {
            format!(
                "[#{} | {}] {}",
                m.id,
                format_local_date(&m.timestamp, zone),
                m.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
