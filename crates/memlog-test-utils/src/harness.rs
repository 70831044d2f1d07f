// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the memory service on top of a temp SQLite
//! database and an optional [`MockProvider`].

use std::path::PathBuf;
use std::sync::Arc;

use chrono_tz::Tz;
use memlog_config::model::{AnthropicConfig, StorageConfig};
use memlog_core::{MemlogError, ProviderAdapter, StorageAdapter};
use memlog_recall::{AnswerService, AnswerSettings, MemoryService};
use memlog_storage::SqliteStorage;

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    provider: Option<MockProvider>,
    zone: Tz,
    anthropic: AnthropicConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            provider: None,
            zone: Tz::UTC,
            anthropic: AnthropicConfig::default(),
        }
    }

    /// Attach a mock provider that replies with `responses` in order.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.provider = Some(MockProvider::with_responses(responses));
        self
    }

    /// Attach a specific mock provider.
    pub fn with_provider(mut self, provider: MockProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Render dates in `zone` instead of UTC.
    pub fn with_zone(mut self, zone: Tz) -> Self {
        self.zone = zone;
        self
    }

    /// Override the model settings used for answers.
    pub fn with_anthropic(mut self, anthropic: AnthropicConfig) -> Self {
        self.anthropic = anthropic;
        self
    }

    /// Build the test harness, opening a fresh database.
    pub async fn build(self) -> Result<TestHarness, MemlogError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| MemlogError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        });
        storage.initialize().await?;
        let storage: Arc<dyn StorageAdapter> = Arc::new(storage);

        let mock_provider = self.provider.map(Arc::new);
        let answers = AnswerService::new(
            mock_provider
                .clone()
                .map(|p| p as Arc<dyn ProviderAdapter>),
            AnswerSettings::from_config(&self.anthropic),
        );
        let service = Arc::new(MemoryService::new(Arc::clone(&storage), answers, self.zone));

        Ok(TestHarness {
            mock_provider,
            storage,
            service,
            db_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A memory service backed by a temp database, cleaned up on drop.
pub struct TestHarness {
    /// The mock provider, if one was configured.
    pub mock_provider: Option<Arc<MockProvider>>,
    /// SQLite storage adapter shared with the service.
    pub storage: Arc<dyn StorageAdapter>,
    /// The service under test.
    pub service: Arc<MemoryService>,
    /// Location of the database file.
    pub db_path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Log each of `contents` as `user_id`, returning the assigned ids.
    pub async fn seed(&self, user_id: &str, contents: &[&str]) -> Result<Vec<i64>, MemlogError> {
        let mut ids = Vec::with_capacity(contents.len());
        for content in contents {
            ids.push(self.service.log(user_id, content, None).await?.id);
        }
        Ok(ids)
    }
}
