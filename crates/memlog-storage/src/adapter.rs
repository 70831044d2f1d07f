// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use memlog_config::model::StorageConfig;
use memlog_core::{
    AdapterType, FtsQuery, HealthStatus, Memory, MemlogError, PluginAdapter, SearchResults,
    StorageAdapter,
};

use crate::database::{map_tr_err, Database};
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened on the first call to
/// [`StorageAdapter::initialize`]; later calls only re-verify the schema.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: StorageAdapter::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, MemlogError> {
        self.db.get().ok_or_else(|| MemlogError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, MemlogError> {
        let Some(db) = self.db.get() else {
            return Ok(HealthStatus::Unhealthy("storage not initialized".into()));
        };
        let indexed = db
            .connection()
            .call(|conn| -> Result<bool, rusqlite::Error> {
                conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE name = 'memories_fts'",
                    [],
                    |row| row.get::<_, i64>(0),
                )
                .map(|n| n == 1)
            })
            .await
            .map_err(map_tr_err)?;
        if indexed {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(
                "full-text index missing; searches use substring scan".into(),
            ))
        }
    }

    async fn shutdown(&self) -> Result<(), MemlogError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), MemlogError> {
        if let Some(db) = self.db.get() {
            return db.ensure_schema().await;
        }
        let path = self.config.database_path.clone();
        let wal_mode = self.config.wal_mode;
        self.db
            .get_or_try_init(|| Database::open(&path, wal_mode))
            .await?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), MemlogError> {
        self.db()?.checkpoint().await
    }

    async fn add_memory(
        &self,
        user_id: &str,
        content: &str,
        channel_id: Option<&str>,
    ) -> Result<i64, MemlogError> {
        queries::memories::add_memory(self.db()?, user_id, content, channel_id).await
    }

    async fn search_memories(
        &self,
        query: &FtsQuery,
        limit: usize,
    ) -> Result<SearchResults, MemlogError> {
        queries::memories::search_memories(self.db()?, query, limit).await
    }

    async fn recent_memories(&self, limit: usize) -> Result<Vec<Memory>, MemlogError> {
        queries::memories::recent_memories(self.db()?, limit).await
    }

    async fn memory_count(&self) -> Result<u64, MemlogError> {
        queries::memories::memory_count(self.db()?).await
    }

    async fn get_memory(&self, id: i64) -> Result<Option<Memory>, MemlogError> {
        queries::memories::get_memory(self.db()?, id).await
    }

    async fn update_memory_content(&self, id: i64, content: &str) -> Result<bool, MemlogError> {
        queries::memories::update_memory_content(self.db()?, id, content).await
    }

    async fn delete_memory(&self, id: i64) -> Result<bool, MemlogError> {
        queries::memories::delete_memory(self.db()?, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn sqlite_storage_implements_plugin_adapter() {
        let storage = SqliteStorage::new(make_config(":memory:"));

        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.version(), semver::Version::new(0, 1, 0));
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_keeps_data() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        let id = storage.add_memory("u1", "kept across init", None).await.unwrap();
        storage.initialize().await.unwrap();

        assert_eq!(storage.memory_count().await.unwrap(), 1);
        let hits = storage
            .search_memories(&FtsQuery::new("\"kept\"", "kept"), 5)
            .await
            .unwrap();
        assert_eq!(hits.hits()[0].memory.id, id);
    }

    #[tokio::test]
    async fn reopening_existing_file_keeps_data() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        let path = db_path.to_str().unwrap();

        let first = SqliteStorage::new(make_config(path));
        first.initialize().await.unwrap();
        first.add_memory("u1", "survives restart", None).await.unwrap();
        first.close().await.unwrap();

        let second = SqliteStorage::new(make_config(path));
        second.initialize().await.unwrap();
        assert_eq!(second.memory_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let storage = SqliteStorage::new(make_config(":memory:"));
        storage.initialize().await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_reports_unhealthy_before_initialize() {
        let storage = SqliteStorage::new(make_config(":memory:"));
        assert!(matches!(
            storage.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let storage = SqliteStorage::new(make_config(":memory:"));
        let err = storage.add_memory("u1", "too early", None).await.unwrap_err();
        assert!(matches!(err, MemlogError::Storage { .. }));
    }

    #[tokio::test]
    async fn shutdown_runs_checkpoint() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("shutdown.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();
        storage.add_memory("u1", "before shutdown", None).await.unwrap();

        storage.shutdown().await.unwrap();
    }
}
