// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway event handler: command registration and dispatch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use memlog_recall::MemoryService;
use serenity::all::{
    Command, CommandInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, CreateMessage,
    EventHandler, GuildId, Interaction, Member, Ready,
};
use tracing::{debug, error, info, warn};

use crate::commands::{self, SlashCommand};
use crate::format;
use crate::messages::{HELP_TEXT, ONBOARDING_DM};

/// Results shown per `/search`.
pub const SEARCH_RESULT_LIMIT: usize = 5;

pub(crate) struct Handler {
    service: Arc<MemoryService>,
    dev_guild_id: Option<u64>,
    onboarding_dm: bool,
    /// Set once commands have been registered; `ready` fires on every reconnect.
    commands_synced: AtomicBool,
}

impl Handler {
    pub(crate) fn new(
        service: Arc<MemoryService>,
        dev_guild_id: Option<u64>,
        onboarding_dm: bool,
    ) -> Self {
        Self {
            service,
            dev_guild_id,
            onboarding_dm,
            commands_synced: AtomicBool::new(false),
        }
    }

    /// Claims the one-time command registration. Returns `false` if already claimed.
    fn claim_command_sync(&self) -> bool {
        self.commands_synced
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Lets the next `ready` retry a registration that failed.
    fn release_command_sync(&self) {
        self.commands_synced.store(false, Ordering::Release);
    }

    async fn register_commands(&self, ctx: &Context) {
        if !self.claim_command_sync() {
            debug!("slash commands already registered, skipping");
            return;
        }
        let definitions = commands::definitions();
        let result = match self.dev_guild_id {
            Some(id) => GuildId::new(id)
                .set_commands(&ctx.http, definitions)
                .await
                .map(|registered| {
                    info!(guild_id = id, count = registered.len(), "commands registered to dev guild");
                }),
            None => Command::set_global_commands(&ctx.http, definitions)
                .await
                .map(|registered| {
                    info!(
                        count = registered.len(),
                        "commands registered globally (propagation can take up to an hour)"
                    );
                }),
        };
        if let Err(e) = result {
            error!(error = %e, "failed to register slash commands");
            self.release_command_sync();
        }
    }

    async fn handle_command(&self, ctx: &Context, interaction: &CommandInteraction) {
        let name = interaction.data.name.as_str();
        let Some(command) = SlashCommand::from_interaction(name, &interaction.data.options) else {
            warn!(command = name, "unrecognized or incomplete command");
            return;
        };

        if command == SlashCommand::Help {
            let response = CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(HELP_TEXT)
                    .ephemeral(true),
            );
            if let Err(e) = interaction.create_response(&ctx.http, response).await {
                warn!(error = %e, "failed to send help");
            }
            return;
        }

        if let Err(e) = interaction.defer(&ctx.http).await {
            warn!(command = name, error = %e, "failed to defer interaction");
            return;
        }

        let user_id = interaction.user.id.to_string();
        let reply = self.run(command, &user_id, interaction).await;
        let followup = CreateInteractionResponseFollowup::new().content(reply);
        if let Err(e) = interaction.create_followup(&ctx.http, followup).await {
            warn!(command = name, error = %e, "failed to send follow-up");
        }
    }

    /// Runs a deferred command and returns the follow-up text.
    async fn run(
        &self,
        command: SlashCommand,
        user_id: &str,
        interaction: &CommandInteraction,
    ) -> String {
        match command {
            SlashCommand::Log { text } => {
                let channel_id = interaction.channel_id.to_string();
                match self.service.log(user_id, &text, Some(&channel_id)).await {
                    Ok(receipt) => format::log_reply(&receipt),
                    Err(e) => {
                        error!(user_id, error = %e, "log failed");
                        format::failure_reply("save memory", &e)
                    }
                }
            }
            SlashCommand::Search { query } => {
                match self.service.search(&query, SEARCH_RESULT_LIMIT).await {
                    Ok(entries) => {
                        info!(user_id, results = entries.len(), "search served");
                        format::search_reply(&query, &entries)
                    }
                    Err(e) => {
                        error!(user_id, error = %e, "search failed");
                        format::truncate_reply(&format!("Search failed: {e}"))
                    }
                }
            }
            SlashCommand::Ask { question } => match self.service.ask(&question).await {
                Ok(answer) => {
                    info!(user_id, "question answered");
                    format::truncate_reply(&answer)
                }
                Err(e) => {
                    error!(user_id, error = %e, "ask failed");
                    format::ask_error_reply(&e)
                }
            },
            SlashCommand::Stats => match self.service.stats().await {
                Ok(stats) => format::stats_reply(&stats),
                Err(e) => {
                    error!(user_id, error = %e, "stats failed");
                    format::failure_reply("get stats", &e)
                }
            },
            SlashCommand::Help => HELP_TEXT.to_string(),
        }
    }
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "connected to Discord"
        );
        self.register_commands(&ctx).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            self.handle_command(&ctx, &command).await;
        }
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        if !self.onboarding_dm || new_member.user.bot {
            return;
        }
        let message = CreateMessage::new().content(ONBOARDING_DM);
        match new_member.user.direct_message(&ctx, message).await {
            Ok(_) => info!(user_id = %new_member.user.id, "onboarding DM sent"),
            // Members may refuse DMs from guild bots.
            Err(e) => debug!(user_id = %new_member.user.id, error = %e, "onboarding DM not delivered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memlog_test_utils::TestHarness;

    #[tokio::test]
    async fn commands_are_registered_once_across_reconnects() {
        let harness = TestHarness::builder().build().await.unwrap();
        let handler = Handler::new(Arc::clone(&harness.service), None, true);

        assert!(handler.claim_command_sync());
        assert!(!handler.claim_command_sync());
        assert!(!handler.claim_command_sync());
    }

    #[tokio::test]
    async fn failed_registration_is_retried_on_next_ready() {
        let harness = TestHarness::builder().build().await.unwrap();
        let handler = Handler::new(Arc::clone(&harness.service), Some(42), false);

        assert!(handler.claim_command_sync());
        handler.release_command_sync();
        assert!(handler.claim_command_sync());
    }
}
