// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal front end for the memory service operations.

use memlog_config::MemlogConfig;
use memlog_core::MemlogError;
use memlog_recall::{LogReceipt, MemoryService, SearchEntry, Stats};

use crate::serve::build_stack;

/// Owner recorded for memories logged from the terminal.
pub const DEFAULT_CLI_USER: &str = "cli";

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

pub async fn run_log(config: &MemlogConfig, user: &str, text: &str) -> Result<(), MemlogError> {
    let stack = build_stack(config).await?;
    let result = log(&stack.service, user, text).await;
    stack.close().await;
    println!("{}", result?);
    Ok(())
}

pub async fn run_search(config: &MemlogConfig, query: &str, limit: usize) -> Result<(), MemlogError> {
    let stack = build_stack(config).await?;
    let result = search(&stack.service, query, limit).await;
    stack.close().await;
    println!("{}", result?);
    Ok(())
}

pub async fn run_ask(config: &MemlogConfig, question: &str) -> Result<(), MemlogError> {
    let stack = build_stack(config).await?;
    let result = stack.service.ask(question).await;
    stack.close().await;
    println!("{}", result?);
    Ok(())
}

pub async fn run_stats(config: &MemlogConfig) -> Result<(), MemlogError> {
    let stack = build_stack(config).await?;
    let result = stack.service.stats().await;
    stack.close().await;
    println!("{}", render_stats(&result?));
    Ok(())
}

async fn log(service: &MemoryService, user: &str, text: &str) -> Result<String, MemlogError> {
    let receipt = service.log(user, text, None).await?;
    Ok(render_receipt(&receipt))
}

async fn search(service: &MemoryService, query: &str, limit: usize) -> Result<String, MemlogError> {
    let entries = service.search(query, limit).await?;
    Ok(render_entries(query, &entries))
}

fn render_receipt(receipt: &LogReceipt) -> String {
    let noun = if receipt.total == 1 { "memory" } else { "memories" };
    format!("Logged #{} ({} {noun} stored)", receipt.id, receipt.total)
}

fn render_entries(query: &str, entries: &[SearchEntry]) -> String {
    if entries.is_empty() {
        return format!("No memories match \"{}\".", query.trim());
    }
    entries
        .iter()
        .map(|e| format!("#{:<5} {}  {}", e.id, e.local_date, e.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_stats(stats: &Stats) -> String {
    let last = stats.last_entry.as_deref().unwrap_or("never");
    format!("Memories:   {}\nLast entry: {last}", stats.total)
}
