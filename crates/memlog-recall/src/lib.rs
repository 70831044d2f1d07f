// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval pipeline for memlog.
//!
//! Turns user text into full-text queries ([`query`]), selects and renders
//! memories for the completion call ([`context`]), asks the provider
//! ([`answer`]), and exposes the four user-facing operations through
//! [`MemoryService`].

pub mod answer;
pub mod context;
pub mod prompts;
pub mod query;
pub mod service;

pub use answer::{AnswerService, AnswerSettings};
pub use context::{format_local_date, ContextAssembler, ContextSource, MemoryContext};
pub use query::build_query;
pub use service::{LogReceipt, MemoryService, SearchEntry, Stats};

#[cfg(test)]
pub(crate) mod testing;
