// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for memlog integration tests.
//!
//! Provides a scripted provider and a harness that wires a temporary
//! SQLite store into a [`memlog_recall::MemoryService`], so front-end
//! tests run without network access or shared state.
//!
//! # Components
//!
//! - [`MockProvider`] - Provider with queued replies and request capture
//! - [`TestHarness`] - Temp-database service stack

pub mod harness;
pub mod mock_provider;

pub use harness::TestHarness;
pub use mock_provider::MockProvider;
