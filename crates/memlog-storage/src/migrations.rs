// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open.

use memlog_core::MemlogError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Schema of the first migration, re-applied on every initialize.
///
/// All statements are `IF NOT EXISTS`, so this repairs a database whose
/// migration history claims objects that were later dropped.
pub(crate) const MEMORIES_SCHEMA: &str = include_str!("../migrations/V1__memories.sql");

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), MemlogError> {
    embedded::migrations::runner().run(conn).map_err(|e| {
        MemlogError::Storage {
            source: Box::new(e),
        }
    })?;
    Ok(())
}
