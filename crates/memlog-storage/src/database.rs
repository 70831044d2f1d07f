// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and schema upkeep.
//!
//! All statements are serialized through tokio-rusqlite's single background
//! thread. Query modules accept `&Database` and go through
//! [`Database::connection`]; do NOT open additional connections for writes.

use std::path::Path;

use memlog_core::MemlogError;
use tracing::{debug, info};

use crate::migrations::{run_migrations, MEMORIES_SCHEMA};

/// Milliseconds SQLite waits on a locked database before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Convert a tokio-rusqlite error into `MemlogError::Storage`.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> MemlogError {
    MemlogError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the memory database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
    path: String,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs and bring the
    /// schema up to date.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, MemlogError> {
        if path != ":memory:"
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| MemlogError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| MemlogError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |conn| -> Result<Result<(), MemlogError>, rusqlite::Error> {
            apply_pragmas(conn, wal_mode)?;
            Ok(run_migrations(conn))
        })
        .await
        .map_err(map_tr_err)??;

        let db = Self {
            conn,
            path: path.to_string(),
        };
        db.ensure_schema().await?;
        info!(path, wal_mode, "memory database opened");
        Ok(db)
    }

    /// The underlying single-writer connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Path the database was opened from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Re-apply the idempotent schema and rebuild the index when it had to be
    /// created next to pre-existing rows.
    pub async fn ensure_schema(&self) -> Result<(), MemlogError> {
        let rebuilt = self
            .conn
            .call(|conn| -> Result<bool, rusqlite::Error> {
                conn.execute_batch(MEMORIES_SCHEMA)?;
                let indexed_rows: i64 =
                    conn.query_row("SELECT COUNT(*) FROM memories_fts_docsize", [], |row| {
                        row.get(0)
                    })?;
                let rows: i64 = conn.query_row("SELECT COUNT(*) FROM memories", [], |row| {
                    row.get(0)
                })?;
                if indexed_rows != rows {
                    conn.execute(
                        "INSERT INTO memories_fts(memories_fts) VALUES ('rebuild')",
                        [],
                    )?;
                    return Ok(true);
                }
                Ok(false)
            })
            .await
            .map_err(map_tr_err)?;

        if rebuilt {
            info!(path = %self.path, "full-text index rebuilt from memories table");
        } else {
            debug!(path = %self.path, "schema verified");
        }
        Ok(())
    }

    /// Checkpoint the WAL so the main database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), MemlogError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            })
            .await
            .map_err(map_tr_err)?;
        debug!(path = %self.path, "WAL checkpoint complete");
        Ok(())
    }
}

fn apply_pragmas(conn: &rusqlite::Connection, wal_mode: bool) -> Result<(), rusqlite::Error> {
    if wal_mode {
        conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
    }
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = ON;\nPRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("memory.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        assert!(db_path.exists());
        assert_eq!(db.path(), db_path.to_str().unwrap());
    }

    #[tokio::test]
    async fn open_enables_wal_mode() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("wal.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        let mode: String = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn schema_objects_exist_after_open() {
        let db = Database::open(":memory:", false).await.unwrap();

        let names: Vec<String> = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master
                     WHERE name IN ('memories', 'memories_fts', 'memories_ai',
                                    'memories_ad', 'memories_au', 'idx_memories_ts')
                     ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect()
            })
            .await
            .unwrap();

        assert_eq!(
            names,
            vec![
                "idx_memories_ts",
                "memories",
                "memories_ad",
                "memories_ai",
                "memories_au",
                "memories_fts",
            ]
        );
    }

    #[tokio::test]
    async fn adopts_database_created_without_migration_history() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("legacy.db");

        {
            let conn = rusqlite::Connection::open(&db_path).unwrap();
            conn.execute_batch(
                "CREATE TABLE memories (
                     id INTEGER PRIMARY KEY AUTOINCREMENT,
                     timestamp TEXT NOT NULL,
                     user_id TEXT NOT NULL,
                     channel_id TEXT,
                     content TEXT NOT NULL
                 );
                 INSERT INTO memories (timestamp, user_id, channel_id, content)
                 VALUES ('2025-01-05T10:00:00.000000+00:00', 'u1', NULL, 'legacy orchard notes');",
            )
            .unwrap();
        }

        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        let hits: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row(
                    "SELECT COUNT(*) FROM memories_fts WHERE memories_fts MATCH '\"orchard\"'",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();
        assert_eq!(hits, 1, "pre-existing rows should be indexed");
    }

    #[tokio::test]
    async fn checkpoint_succeeds_on_open_database() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("ckpt.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.checkpoint().await.unwrap();
    }
}
