// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for memlog.
//!
//! Provides a WAL-mode SQLite store with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and memory operations that keep the
//! `memories` table and its FTS5 index in lockstep.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
