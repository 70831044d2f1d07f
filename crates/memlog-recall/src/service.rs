// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The operations exposed to chat and terminal front ends.

use std::sync::Arc;

use chrono_tz::Tz;
use memlog_core::{MemlogError, StorageAdapter};
use tracing::{debug, info};

use crate::answer::AnswerService;
use crate::context::{format_local_date, ContextAssembler};
use crate::query::build_query;

/// Result of logging a memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReceipt {
    pub id: i64,
    /// Store-wide memory count after the insert.
    pub total: u64,
}

/// One search result as shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub id: i64,
    pub local_date: String,
    pub snippet: String,
}

/// Store-wide statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total: u64,
    /// Local date of the newest memory, if any.
    pub last_entry: Option<String>,
}

/// Log, search, ask and stats over a shared store.
pub struct MemoryService {
    storage: Arc<dyn StorageAdapter>,
    assembler: ContextAssembler,
    answers: AnswerService,
    zone: Tz,
}

impl MemoryService {
    /// `zone` is the display zone resolved at startup.
    pub fn new(storage: Arc<dyn StorageAdapter>, answers: AnswerService, zone: Tz) -> Self {
        Self {
            assembler: ContextAssembler::new(Arc::clone(&storage), zone),
            storage,
            answers,
            zone,
        }
    }

    pub fn storage(&self) -> &Arc<dyn StorageAdapter> {
        &self.storage
    }

    pub fn answers(&self) -> &AnswerService {
        &self.answers
    }

    /// Store a memory and report its id with the new total.
    pub async fn log(
        &self,
        user_id: &str,
        content: &str,
        channel_id: Option<&str>,
    ) -> Result<LogReceipt, MemlogError> {
        let id = self.storage.add_memory(user_id, content, channel_id).await?;
        let total = self.storage.memory_count().await?;
        info!(user_id, id, total, "memory logged");
        Ok(LogReceipt { id, total })
    }

    /// Search for `query`, returning at most `limit` entries.
    ///
    /// Blank queries return nothing without touching storage.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchEntry>, MemlogError> {
        let Some(fts) = build_query(query) else {
            debug!("blank search query");
            return Ok(Vec::new());
        };

        let results = self.storage.search_memories(&fts, limit).await?;
        let degraded = results.is_degraded();
        let entries: Vec<SearchEntry> = results
            .into_hits()
            .into_iter()
            .map(|hit| SearchEntry {
                id: hit.memory.id,
                local_date: format_local_date(&hit.memory.timestamp, self.zone),
                snippet: hit.snippet,
            })
            .collect();
        info!(results = entries.len(), degraded, "search completed");
        Ok(entries)
    }

    /// Answer a question from the stored memories.
    pub async fn ask(&self, question: &str) -> Result<String, MemlogError> {
        self.answers.provider()?;
        let context = self.assembler.build_context(question).await?;
        self.answers.answer(question, &context).await
    }

    pub async fn stats(&self) -> Result<Stats, MemlogError> {
        let total = self.storage.memory_count().await?;
        let last_entry = self
            .storage
            .recent_memories(1)
            .await?
            .first()
            .map(|m| format_local_date(&m.timestamp, self.zone));
        Ok(Stats { total, last_entry })
    }
}
