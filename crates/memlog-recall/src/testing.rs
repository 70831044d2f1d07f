// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixtures shared by this crate's unit tests.
//!
//! `memlog-test-utils` depends on this crate, so its `MockProvider` cannot be
//! used here; `RecordingProvider` is the minimal local stand-in.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use memlog_config::model::StorageConfig;
use memlog_core::{
    AdapterType, HealthStatus, MemlogError, PluginAdapter, ProviderAdapter, ProviderRequest,
    ProviderResponse, StorageAdapter, TokenUsage,
};
use memlog_storage::SqliteStorage;

/// Initialized in-memory storage.
pub async fn memory_storage() -> Arc<dyn StorageAdapter> {
    let storage = SqliteStorage::new(StorageConfig {
        database_path: ":memory:".into(),
        wal_mode: false,
    });
    storage.initialize().await.unwrap();
    Arc::new(storage)
}

/// Provider that echoes a fixed reply and records requests.
pub struct RecordingProvider {
    reply: Result<String, String>,
    pub requests: Mutex<Vec<ProviderRequest>>,
}

impl RecordingProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> ProviderRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl PluginAdapter for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 0, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MemlogError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MemlogError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for RecordingProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, MemlogError> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(text) => Ok(ProviderResponse {
                id: "msg_test".into(),
                content: text.clone(),
                model,
                stop_reason: Some("end_turn".into()),
                usage: TokenUsage::default(),
            }),
            Err(message) => Err(MemlogError::Provider {
                message: message.clone(),
                source: None,
            }),
        }
    }
}
