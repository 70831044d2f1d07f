// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `memlog serve` and the shared startup wiring.

use std::sync::Arc;

use memlog_anthropic::AnthropicProvider;
use memlog_config::MemlogConfig;
use memlog_core::{MemlogError, ProviderAdapter, StorageAdapter};
use memlog_recall::{AnswerService, AnswerSettings, MemoryService};
use memlog_storage::SqliteStorage;
use tracing::{info, warn};

/// Storage plus the service built on top of it.
pub struct Stack {
    pub storage: Arc<SqliteStorage>,
    pub service: Arc<MemoryService>,
}

impl Stack {
    /// Flush and release the database.
    pub async fn close(&self) {
        if let Err(e) = self.storage.close().await {
            warn!(error = %e, "storage close failed");
        }
    }
}

/// Open the store and assemble the memory service.
///
/// A missing Anthropic key only disables question answering.
pub async fn build_stack(config: &MemlogConfig) -> Result<Stack, MemlogError> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let provider: Option<Arc<dyn ProviderAdapter>> = match AnthropicProvider::new(config) {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) if e.is_config() => {
            warn!(error = %e, "question answering disabled");
            None
        }
        Err(e) => return Err(e),
    };

    let answers = AnswerService::new(provider, AnswerSettings::from_config(&config.anthropic));
    let zone = config.display.resolve_zone();
    let service = Arc::new(MemoryService::new(
        Arc::clone(&storage) as Arc<dyn StorageAdapter>,
        answers,
        zone,
    ));

    Ok(Stack { storage, service })
}

/// Run the Discord bot until it disconnects or receives Ctrl-C.
pub async fn run_serve(config: MemlogConfig) -> Result<(), MemlogError> {
    let stack = build_stack(&config).await?;
    info!(
        database = %config.storage.database_path,
        timezone = %config.display.timezone,
        "memlog starting"
    );

    let result = memlog_discord::run(&config.discord, Arc::clone(&stack.service)).await;
    stack.close().await;
    info!("memlog stopped");
    result
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("memlog={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
