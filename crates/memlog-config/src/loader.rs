// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./memlog.toml` > `~/.config/memlog/memlog.toml` > `/etc/memlog/memlog.toml`
//! with environment variable overrides via `MEMLOG_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MemlogConfig;

/// System-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/memlog/memlog.toml";

/// Local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "memlog.toml";

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("memlog/memlog.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/memlog/memlog.toml` (system-wide)
/// 3. `~/.config/memlog/memlog.toml` (user XDG config)
/// 4. `./memlog.toml` (local directory)
/// 5. `MEMLOG_*` environment variables
pub fn load_config() -> Result<MemlogConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<MemlogConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemlogConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MemlogConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemlogConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MemlogConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// keys stay intact: `MEMLOG_DISCORD_BOT_TOKEN` maps to `discord.bot_token`,
/// not `discord.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("MEMLOG_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("discord_", "discord.", 1)
            .replacen("display_", "display.", 1);
        mapped.into()
    })
}
