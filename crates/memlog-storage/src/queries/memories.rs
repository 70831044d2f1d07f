// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory CRUD and search operations.
//!
//! Index maintenance lives entirely in the `memories_*` triggers, so every
//! write below is a single statement and therefore atomic with its index
//! update.

use chrono::{DateTime, SecondsFormat, Utc};
use memlog_core::{FtsQuery, Memory, MemlogError, SearchHit, SearchResults};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, warn};

use crate::database::{map_tr_err, Database};

/// Longest snippet handed back with a search hit, in characters.
pub const SNIPPET_MAX_CHARS: usize = 200;

const MEMORY_COLUMNS: &str = "m.id, m.timestamp, m.user_id, m.channel_id, m.content";

/// Insert a memory stamped with the current UTC time and return its id.
pub async fn add_memory(
    db: &Database,
    user_id: &str,
    content: &str,
    channel_id: Option<&str>,
) -> Result<i64, MemlogError> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let user_id = user_id.to_string();
    let content = content.to_string();
    let channel_id = channel_id.map(str::to_string);

    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO memories (timestamp, user_id, channel_id, content)
                 VALUES (?1, ?2, ?3, ?4)",
                params![timestamp, user_id, channel_id, content],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Ranked full-text search with a substring fallback.
///
/// When FTS5 rejects the expression the content column is scanned with
/// `LIKE` instead and the hits come back as [`SearchResults::Degraded`],
/// newest first.
pub async fn search_memories(
    db: &Database,
    query: &FtsQuery,
    limit: usize,
) -> Result<SearchResults, MemlogError> {
    let expression = query.expression().to_string();
    let text = query.text().to_string();
    let limit = sql_limit(limit);

    db.connection()
        .call(move |conn| -> Result<SearchResults, rusqlite::Error> {
            match ranked_search(conn, &expression, limit) {
                Ok(hits) => Ok(SearchResults::Ranked(hits)),
                Err(rusqlite::Error::SqliteFailure(err, detail)) => {
                    warn!(
                        code = ?err.code,
                        detail = detail.as_deref().unwrap_or_default(),
                        "full-text query rejected, using substring scan"
                    );
                    substring_search(conn, &text, limit).map(SearchResults::Degraded)
                }
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Most recent memories, newest first by id.
pub async fn recent_memories(db: &Database, limit: usize) -> Result<Vec<Memory>, MemlogError> {
    let limit = sql_limit(limit);
    db.connection()
        .call(move |conn| -> Result<Vec<Memory>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MEMORY_COLUMNS} FROM memories m ORDER BY m.id DESC LIMIT ?1"
            ))?;
            let rows = stmt.query_map(params![limit], row_to_memory)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Total number of stored memories across all users.
pub async fn memory_count(db: &Database) -> Result<u64, MemlogError> {
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM memories", [], |row| row.get(0))
        })
        .await
        .map(|count| u64::try_from(count).unwrap_or_default())
        .map_err(map_tr_err)
}

/// Fetch one memory by id.
pub async fn get_memory(db: &Database, id: i64) -> Result<Option<Memory>, MemlogError> {
    db.connection()
        .call(move |conn| -> Result<Option<Memory>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {MEMORY_COLUMNS} FROM memories m WHERE m.id = ?1"),
                params![id],
                row_to_memory,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Replace a memory's content. Returns `false` if no such memory exists.
///
/// The timestamp and owner are left untouched.
pub async fn update_memory_content(
    db: &Database,
    id: i64,
    content: &str,
) -> Result<bool, MemlogError> {
    let content = content.to_string();
    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE memories SET content = ?1 WHERE id = ?2",
                params![content, id],
            )
        })
        .await
        .map_err(map_tr_err)?;
    debug!(id, changed, "memory content updated");
    Ok(changed > 0)
}

/// Delete a memory. Returns `false` if no such memory exists.
pub async fn delete_memory(db: &Database, id: i64) -> Result<bool, MemlogError> {
    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute("DELETE FROM memories WHERE id = ?1", params![id])
        })
        .await
        .map_err(map_tr_err)?;
    debug!(id, changed, "memory deleted");
    Ok(changed > 0)
}

fn ranked_search(
    conn: &rusqlite::Connection,
    expression: &str,
    limit: i64,
) -> Result<Vec<SearchHit>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEMORY_COLUMNS}, snippet(memories_fts, 0, '**', '**', '...', 32)
         FROM memories_fts
         JOIN memories m ON memories_fts.rowid = m.id
         WHERE memories_fts MATCH ?1
         ORDER BY rank
         LIMIT ?2"
    ))?;
    let rows = stmt.query_map(params![expression, limit], |row| {
        let snippet: Option<String> = row.get(5)?;
        Ok(SearchHit {
            memory: row_to_memory(row)?,
            snippet: truncate_chars(snippet.as_deref().unwrap_or_default(), SNIPPET_MAX_CHARS),
        })
    })?;
    rows.collect()
}

fn substring_search(
    conn: &rusqlite::Connection,
    text: &str,
    limit: i64,
) -> Result<Vec<SearchHit>, rusqlite::Error> {
    let pattern = format!("%{}%", escape_like(text));
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEMORY_COLUMNS} FROM memories m
         WHERE m.content LIKE ?1 ESCAPE '\\'
         ORDER BY m.timestamp DESC, m.id DESC
         LIMIT ?2"
    ))?;
    let rows = stmt.query_map(params![pattern, limit], |row| {
        let memory = row_to_memory(row)?;
        let snippet = truncate_chars(&memory.content, SNIPPET_MAX_CHARS);
        Ok(SearchHit { memory, snippet })
    })?;
    rows.collect()
}

/// Convert a rusqlite Row holding `MEMORY_COLUMNS` into a Memory.
fn row_to_memory(row: &rusqlite::Row<'_>) -> Result<Memory, rusqlite::Error> {
    let raw_timestamp: String = row.get(1)?;
    let timestamp = DateTime::parse_from_rfc3339(&raw_timestamp)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Memory {
        id: row.get(0)?,
        timestamp,
        user_id: row.get(2)?,
        channel_id: row.get(3)?,
        content: row.get(4)?,
    })
}

/// Escape `LIKE` metacharacters so `text` matches literally under `ESCAPE '\'`.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// First `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
