// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer generation over an assembled memory context.

use std::sync::Arc;

use memlog_config::model::AnthropicConfig;
use memlog_core::{MemlogError, ProviderAdapter, ProviderMessage, ProviderRequest};
use tracing::info;

use crate::context::MemoryContext;
use crate::prompts;

/// Model and prompt settings for answer generation.
#[derive(Debug, Clone)]
pub struct AnswerSettings {
    pub model: String,
    pub max_tokens: u32,
    pub system_prompt: String,
}

impl AnswerSettings {
    pub fn from_config(config: &AnthropicConfig) -> Self {
        Self {
            model: config.default_model.clone(),
            max_tokens: config.max_tokens,
            system_prompt: prompts::ASK_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Sends context plus question to the completion provider.
///
/// Holds no provider when no credential was configured; every answer then
/// fails with [`MemlogError::Config`].
pub struct AnswerService {
    provider: Option<Arc<dyn ProviderAdapter>>,
    settings: AnswerSettings,
}

impl AnswerService {
    pub fn new(provider: Option<Arc<dyn ProviderAdapter>>, settings: AnswerSettings) -> Self {
        Self { provider, settings }
    }

    /// Whether a completion provider is available.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn settings(&self) -> &AnswerSettings {
        &self.settings
    }

    /// Ask the provider and return its text unchanged.
    pub async fn answer(
        &self,
        question: &str,
        context: &MemoryContext,
    ) -> Result<String, MemlogError> {
        let provider = self.provider()?;
        let request = self.build_request(question, context);
        let response = provider.complete(request).await?;

        info!(
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "answer generated"
        );
        Ok(response.content)
    }

    /// The request sent for `question`.
    pub fn build_request(&self, question: &str, context: &MemoryContext) -> ProviderRequest {
        let content = match context {
            MemoryContext::Selected { block, .. } => prompts::memories_message(block, question),
            MemoryContext::EmptyStore => prompts::empty_store_message(question),
        };

        ProviderRequest {
            model: self.settings.model.clone(),
            system_prompt: Some(self.settings.system_prompt.clone()),
            messages: vec![ProviderMessage {
                role: "user".to_string(),
                content,
            }],
            max_tokens: self.settings.max_tokens,
        }
    }

    pub(crate) fn provider(&self) -> Result<&Arc<dyn ProviderAdapter>, MemlogError> {
        self.provider.as_ref().ok_or_else(|| {
            MemlogError::Config(
                "no Anthropic API key configured; set anthropic.api_key or ANTHROPIC_API_KEY"
                    .to_string(),
            )
        })
    }
}
