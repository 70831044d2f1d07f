// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the memlog pipeline.
//!
//! Each test creates an isolated TestHarness with a temp SQLite database and,
//! where needed, a mock provider. Tests are independent and order-insensitive.

use std::sync::Arc;

use memlog_core::MemlogError;
use memlog_discord::format;
use memlog_test_utils::{MockProvider, TestHarness};

// ---- Log and search ----

#[tokio::test]
async fn test_logged_memory_is_found_by_search() {
    let harness = TestHarness::builder().build().await.unwrap();

    let receipt = harness
        .service
        .log("user-u", "Met Sarah about Q1 planning", Some("chan-1"))
        .await
        .unwrap();
    assert_eq!(receipt.total, 1);

    let entries = harness.service.search("sarah", 5).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, receipt.id);

    let other = harness
        .service
        .log("user-v", "Lunch with the design team", None)
        .await
        .unwrap();
    assert_eq!(other.total, 2);
}

#[tokio::test]
async fn test_search_reply_formats_matches() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .seed("u1", &["Budget review moved to Thursday", "Call the plumber"])
        .await
        .unwrap();

    let entries = harness.service.search("budget", 5).await.unwrap();
    let reply = format::search_reply("budget", &entries);
    assert!(reply.starts_with("**Found 1 memories matching \"budget\":**"));
    assert!(reply.contains("**#1**"));
    assert!(!reply.contains("plumber"));
}

#[tokio::test]
async fn test_blank_search_returns_nothing() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.seed("u1", &["anything at all"]).await.unwrap();
    assert!(harness.service.search("   ", 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_respects_limit() {
    let harness = TestHarness::builder().build().await.unwrap();
    let notes: Vec<String> = (0..8).map(|i| format!("standup note {i}")).collect();
    let refs: Vec<&str> = notes.iter().map(String::as_str).collect();
    harness.seed("u1", &refs).await.unwrap();

    let entries = harness.service.search("standup", 5).await.unwrap();
    assert_eq!(entries.len(), 5);
}

// ---- Ask ----

#[tokio::test]
async fn test_ask_sends_matching_memories_to_provider() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["You met Sarah [#1].".to_string()])
        .build()
        .await
        .unwrap();
    harness
        .seed("u1", &["Met Sarah about Q1 planning", "Fixed the bike"])
        .await
        .unwrap();

    let answer = harness.service.ask("Sarah").await.unwrap();
    assert_eq!(answer, "You met Sarah [#1].");

    let requests = harness.mock_provider.as_ref().unwrap().requests().await;
    assert_eq!(requests.len(), 1);
    let message = &requests[0].messages[0].content;
    assert!(message.contains("[#1 | "));
    assert!(message.contains("Met Sarah about Q1 planning"));
    assert!(!message.contains("Fixed the bike"));
    assert!(requests[0].system_prompt.is_some());
}

#[tokio::test]
async fn test_ask_falls_back_to_recent_memories() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Nothing about volcanoes.".to_string()])
        .build()
        .await
        .unwrap();
    let notes: Vec<String> = (1..=12).map(|i| format!("daily entry {i}")).collect();
    let refs: Vec<&str> = notes.iter().map(String::as_str).collect();
    harness.seed("u1", &refs).await.unwrap();

    harness.service.ask("volcano").await.unwrap();

    let requests = harness.mock_provider.as_ref().unwrap().requests().await;
    let message = &requests[0].messages[0].content;
    assert!(message.contains("[#12 | "));
    assert!(message.contains("[#3 | "));
    assert!(!message.contains("[#2 | "));
    assert!(message.find("[#12 | ").unwrap() < message.find("[#11 | ").unwrap());
}

#[tokio::test]
async fn test_ask_on_empty_store_still_calls_provider() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Log something first.".to_string()])
        .build()
        .await
        .unwrap();

    let answer = harness.service.ask("what did I do?").await.unwrap();
    assert_eq!(answer, "Log something first.");

    let requests = harness.mock_provider.as_ref().unwrap().requests().await;
    assert!(requests[0].messages[0]
        .content
        .starts_with("I don't have any relevant memories stored yet."));
}

#[tokio::test]
async fn test_ask_without_provider_is_config_error() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.seed("u1", &["something"]).await.unwrap();

    let err = harness.service.ask("anything?").await.unwrap_err();
    assert!(err.is_config());
    assert!(format::ask_error_reply(&err).starts_with("Configuration error: "));
}

#[tokio::test]
async fn test_provider_failure_becomes_failure_reply() {
    let harness = TestHarness::builder()
        .with_provider(MockProvider::failing("overloaded"))
        .build()
        .await
        .unwrap();
    harness.seed("u1", &["something"]).await.unwrap();

    let err = harness.service.ask("something").await.unwrap_err();
    assert!(matches!(err, MemlogError::Provider { .. }));
    assert_eq!(
        format::ask_error_reply(&err),
        "Failed to answer: provider error: overloaded"
    );
}

// ---- Stats ----

#[tokio::test]
async fn test_stats_track_total_and_last_entry() {
    let harness = TestHarness::builder()
        .with_zone(chrono_tz::Asia::Kolkata)
        .build()
        .await
        .unwrap();

    let empty = harness.service.stats().await.unwrap();
    assert_eq!(empty.total, 0);
    assert!(empty.last_entry.is_none());
    assert!(format::stats_reply(&empty).contains("Get started"));

    harness.seed("u1", &["one", "two"]).await.unwrap();
    let stats = harness.service.stats().await.unwrap();
    assert_eq!(stats.total, 2);
    let last = stats.last_entry.unwrap();
    assert_eq!(last.len(), "2026-01-01 00:00".len());
}

// ---- Concurrency ----

#[tokio::test]
async fn test_concurrent_logs_get_distinct_ids() {
    let harness = TestHarness::builder().build().await.unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let service = Arc::clone(&harness.service);
        handles.push(tokio::spawn(async move {
            service
                .log(&format!("user-{}", i % 3), &format!("parallel note {i}"), None)
                .await
                .unwrap()
                .id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    assert_eq!(harness.service.stats().await.unwrap().total, 20);
    assert_eq!(harness.service.search("parallel", 50).await.unwrap().len(), 20);
}
