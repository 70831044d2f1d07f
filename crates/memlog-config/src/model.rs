// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for memlog.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level memlog configuration.
///
/// Loaded once at startup and passed by reference into each component.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemlogConfig {
    /// Process-level settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Discord bot settings.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Date rendering settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("memlog").join("memory.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("memory.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` falls back to `ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used to answer questions.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Maximum tokens to generate per answer.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
        }
    }
}

fn default_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscordConfig {
    /// Bot token. `None` falls back to `DISCORD_TOKEN`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Guild to register slash commands in for fast iteration.
    /// `None` registers them globally.
    #[serde(default)]
    pub dev_guild_id: Option<u64>,

    /// Send a welcome DM to members joining a guild.
    #[serde(default = "default_onboarding_dm")]
    pub onboarding_dm: bool,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            dev_guild_id: None,
            onboarding_dm: default_onboarding_dm(),
        }
    }
}

fn default_onboarding_dm() -> bool {
    true
}

/// Date rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// IANA time-zone name used to render memory dates.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "America/Denver".to_string()
}

impl DisplayConfig {
    /// Resolves the configured zone name.
    ///
    /// Called once at startup; an unknown name logs a warning and yields UTC.
    pub fn resolve_zone(&self) -> Tz {
        match self.timezone.trim().parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                warn!(
                    timezone = %self.timezone,
                    "unknown display.timezone, rendering dates in UTC"
                );
                Tz::UTC
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn defaults_match_documented_values() {
        let config = MemlogConfig::default();
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.anthropic.default_model, "claude-3-5-haiku-latest");
        assert_eq!(config.anthropic.max_tokens, 1024);
        assert_eq!(config.display.timezone, "America/Denver");
        assert!(config.storage.wal_mode);
        assert!(config.storage.database_path.ends_with("memory.db"));
        assert!(config.discord.onboarding_dm);
        assert!(config.discord.dev_guild_id.is_none());
    }

    #[test]
    fn resolve_zone_accepts_iana_names() {
        let display = DisplayConfig {
            timezone: "Europe/Berlin".into(),
        };
        assert_eq!(display.resolve_zone(), chrono_tz::Europe::Berlin);
    }

    #[test]
    #[traced_test]
    fn resolve_zone_falls_back_to_utc() {
        let display = DisplayConfig {
            timezone: "Mars/Olympus_Mons".into(),
        };
        assert_eq!(display.resolve_zone(), Tz::UTC);
        assert!(logs_contain("unknown display.timezone"));
    }
}
