// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord slash-command channel for memlog.
//!
//! Registers `/log`, `/search`, `/ask`, `/stats` and `/help`, routes each
//! invocation to the [`MemoryService`], and replies within Discord's
//! message limits.

pub mod commands;
pub mod format;
mod handler;
pub mod messages;

use std::sync::Arc;

use memlog_config::model::DiscordConfig;
use memlog_core::MemlogError;
use memlog_recall::MemoryService;
use serenity::all::{Client, GatewayIntents};
use tracing::info;

pub use handler::SEARCH_RESULT_LIMIT;

/// Environment variable consulted when the config carries no bot token.
pub const BOT_TOKEN_ENV: &str = "DISCORD_TOKEN";

/// Connect to Discord and serve commands until the gateway stops or Ctrl-C.
pub async fn run(config: &DiscordConfig, service: Arc<MemoryService>) -> Result<(), MemlogError> {
    let token = resolve_bot_token(config.bot_token.as_deref(), std::env::var(BOT_TOKEN_ENV).ok())?;

    let mut intents = GatewayIntents::GUILDS;
    if config.onboarding_dm {
        intents |= GatewayIntents::GUILD_MEMBERS;
    }

    let handler = handler::Handler::new(service, config.dev_guild_id, config.onboarding_dm);
    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| MemlogError::Channel {
            message: format!("failed to create Discord client: {e}"),
            source: Some(Box::new(e)),
        })?;

    let shard_manager = client.shard_manager.clone();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, disconnecting from Discord");
            shard_manager.shutdown_all().await;
        }
        result = client.start() => {
            result.map_err(|e| MemlogError::Channel {
                message: format!("Discord client error: {e}"),
                source: Some(Box::new(e)),
            })?;
        }
    }

    info!("Discord channel stopped");
    Ok(())
}

/// Picks the bot token from config, then from the environment value.
pub fn resolve_bot_token(
    config_token: Option<&str>,
    env_token: Option<String>,
) -> Result<String, MemlogError> {
    if let Some(token) = config_token
        && !token.trim().is_empty()
    {
        return Ok(token.to_string());
    }

    env_token.filter(|token| !token.trim().is_empty()).ok_or_else(|| {
        MemlogError::Config(format!(
            "Discord bot token not found. Set discord.bot_token in config or the {BOT_TOKEN_ENV} environment variable."
        ))
    })
}
