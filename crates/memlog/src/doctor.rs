// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `memlog doctor` command implementation.
//!
//! Runs diagnostic checks against the memlog environment to identify
//! configuration issues, database problems and missing credentials.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono_tz::Tz;
use memlog_config::model::StorageConfig;
use memlog_config::MemlogConfig;
use memlog_core::{HealthStatus, MemlogError, PluginAdapter, StorageAdapter};
use memlog_storage::SqliteStorage;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `memlog doctor` command.
///
/// With `plain`, disables colored output.
pub async fn run_doctor(
    config: &MemlogConfig,
    config_path: Option<&Path>,
    plain: bool,
) -> Result<(), MemlogError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(config_path),
        check_database(&config.storage).await,
        check_timezone(&config.display.timezone),
        check_api_key(
            config.anthropic.api_key.as_deref(),
            std::env::var(memlog_anthropic::API_KEY_ENV).ok(),
        ),
        check_bot_token(
            config.discord.bot_token.as_deref(),
            std::env::var(memlog_discord::BOT_TOKEN_ENV).ok(),
        ),
    ];

    println!();
    println!("  memlog doctor");
    println!("  {}", "-".repeat(50));

    for result in &results {
        println!("{}", render_line(result, use_color));
    }

    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }

    println!();

    Ok(())
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();

    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green().to_string(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow().to_string(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red().to_string(), result.message.red()),
        };
        return format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        );
    }

    let tag = match result.status {
        CheckStatus::Pass => "[OK]  ",
        CheckStatus::Warn => "[WARN]",
        CheckStatus::Fail => "[FAIL]",
    };
    format!(
        "    {tag} {:<20} {} ({duration_ms}ms)",
        result.name, result.message
    )
}

/// Check configuration loads without errors.
fn check_config(path: Option<&Path>) -> CheckResult {
    let start = Instant::now();
    let loaded = match path {
        Some(path) => memlog_config::load_and_validate_path(path),
        None => memlog_config::load_and_validate(),
    };
    match loaded {
        Ok(_) => CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

/// Check the database opens, carries its search index and can be counted.
///
/// A missing file is not created.
async fn check_database(config: &StorageConfig) -> CheckResult {
    let start = Instant::now();
    let db_path = &config.database_path;

    if db_path != ":memory:" && !Path::new(db_path).exists() {
        return CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {db_path} (will be created on first run)"),
            start,
        );
    }

    let storage = SqliteStorage::new(config.clone());
    if let Err(e) = storage.initialize().await {
        return CheckResult::new("Database", CheckStatus::Fail, format!("open failed: {e}"), start);
    }

    let result = match storage.health_check().await {
        Ok(HealthStatus::Healthy) => match storage.memory_count().await {
            Ok(count) => CheckResult::new(
                "Database",
                CheckStatus::Pass,
                format!("{count} memories"),
                start,
            ),
            Err(e) => {
                CheckResult::new("Database", CheckStatus::Fail, format!("count failed: {e}"), start)
            }
        },
        Ok(HealthStatus::Degraded(reason)) => {
            CheckResult::new("Database", CheckStatus::Warn, reason, start)
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            CheckResult::new("Database", CheckStatus::Fail, reason, start)
        }
        Err(e) => CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start),
    };

    let _ = storage.close().await;
    result
}

fn check_timezone(timezone: &str) -> CheckResult {
    let start = Instant::now();
    match timezone.trim().parse::<Tz>() {
        Ok(tz) => CheckResult::new("Time zone", CheckStatus::Pass, tz.name(), start),
        Err(_) => CheckResult::new(
            "Time zone",
            CheckStatus::Warn,
            format!("unknown zone {timezone:?}, dates render in UTC"),
            start,
        ),
    }
}

fn check_api_key(config_key: Option<&str>, env_key: Option<String>) -> CheckResult {
    let start = Instant::now();
    match memlog_anthropic::resolve_api_key(config_key, env_key) {
        Ok(_) => CheckResult::new("Anthropic API key", CheckStatus::Pass, "configured", start),
        Err(_) => CheckResult::new(
            "Anthropic API key",
            CheckStatus::Warn,
            "not configured (ask is disabled)",
            start,
        ),
    }
}

fn check_bot_token(config_token: Option<&str>, env_token: Option<String>) -> CheckResult {
    let start = Instant::now();
    match memlog_discord::resolve_bot_token(config_token, env_token) {
        Ok(_) => CheckResult::new("Discord token", CheckStatus::Pass, "configured", start),
        Err(_) => CheckResult::new(
            "Discord token",
            CheckStatus::Warn,
            "not configured (serve is unavailable)",
            start,
        ),
    }
}
