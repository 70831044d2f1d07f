// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter for memlog.
//!
//! This crate implements [`ProviderAdapter`] for the Anthropic Messages API
//! using single-shot (non-streaming) completion.

pub mod client;
pub mod types;

use async_trait::async_trait;
use memlog_config::MemlogConfig;
use memlog_core::{
    AdapterType, HealthStatus, MemlogError, PluginAdapter, ProviderAdapter, ProviderRequest,
    ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Environment variable consulted when the config carries no API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Anthropic Claude provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider from the given configuration.
    ///
    /// Fails with [`MemlogError::Config`] when no API key can be found.
    pub fn new(config: &MemlogConfig) -> Result<Self, MemlogError> {
        let api_key = resolve_api_key(
            config.anthropic.api_key.as_deref(),
            std::env::var(API_KEY_ENV).ok(),
        )?;
        let client = AnthropicClient::new(&api_key, &config.anthropic.api_version)?;

        info!(
            model = %config.anthropic.default_model,
            "Anthropic provider initialized"
        );
        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: AnthropicClient) -> Self {
        Self { client }
    }

    fn to_message_request(request: ProviderRequest) -> MessageRequest {
        MessageRequest {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .map(|m| ApiMessage {
                    role: m.role,
                    content: m.content,
                })
                .collect(),
            system: request.system_prompt,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MemlogError> {
        // Key presence is checked at construction; no API call is made here.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MemlogError> {
        debug!("Anthropic provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, MemlogError> {
        let api_request = Self::to_message_request(request);
        let response = self.client.complete_message(&api_request).await?;
        let content = response.text();

        Ok(ProviderResponse {
            id: response.id,
            content,
            model: response.model,
            stop_reason: response.stop_reason,
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        })
    }
}

/// Picks the API key from config, then from the environment value.
///
/// Blank values count as missing.
pub fn resolve_api_key(
    config_key: Option<&str>,
    env_key: Option<String>,
) -> Result<String, MemlogError> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Ok(key.to_string());
    }

    env_key.filter(|key| !key.trim().is_empty()).ok_or_else(|| {
        MemlogError::Config(format!(
            "Anthropic API key not found. Set anthropic.api_key in config or the {API_KEY_ENV} environment variable."
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use memlog_core::ProviderMessage;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn resolve_api_key_prefers_config() {
        let key = resolve_api_key(Some("sk-config"), Some("sk-env".into())).unwrap();
        assert_eq!(key, "sk-config");
    }

    #[test]
    fn resolve_api_key_blank_config_falls_back_to_env() {
        let key = resolve_api_key(Some("  "), Some("sk-env".into())).unwrap();
        assert_eq!(key, "sk-env");
    }

    #[test]
    fn resolve_api_key_missing_everywhere_is_config_error() {
        let err = resolve_api_key(None, None).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("API key not found"), "got: {err}");

        assert!(resolve_api_key(None, Some(String::new())).unwrap_err().is_config());
    }

    #[test]
    fn provider_request_maps_to_api_request() {
        let request = ProviderRequest {
            model: "claude-3-5-haiku-latest".into(),
            system_prompt: Some("system".into()),
            messages: vec![ProviderMessage {
                role: "user".into(),
                content: "question".into(),
            }],
            max_tokens: 256,
        };
        let api = AnthropicProvider::to_message_request(request);
        assert_eq!(api.model, "claude-3-5-haiku-latest");
        assert_eq!(api.system.as_deref(), Some("system"));
        assert_eq!(api.messages[0].role, "user");
        assert_eq!(api.messages[0].content, "question");
        assert_eq!(api.max_tokens, 256);
    }

    #[tokio::test]
    async fn complete_returns_concatenated_text_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"system": "system"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "Part one. "},
                    {"type": "text", "text": "Part two."}
                ],
                "model": "claude-3-5-haiku-latest",
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 30, "output_tokens": 7}
            })))
            .mount(&server)
            .await;

        let client = AnthropicClient::new("test-key", "2023-06-01")
            .unwrap()
            .with_base_url(server.uri());
        let provider = AnthropicProvider::with_client(client);
        let response = provider
            .complete(ProviderRequest {
                model: "claude-3-5-haiku-latest".into(),
                system_prompt: Some("system".into()),
                messages: vec![ProviderMessage {
                    role: "user".into(),
                    content: "hi".into(),
                }],
                max_tokens: 64,
            })
            .await
            .unwrap();

        assert_eq!(response.content, "Part one. Part two.");
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
        assert_eq!(
            response.usage,
            TokenUsage {
                input_tokens: 30,
                output_tokens: 7
            }
        );
    }

    #[tokio::test]
    async fn plugin_adapter_metadata() {
        let client = AnthropicClient::new("test-key", "2023-06-01").unwrap();
        let provider = AnthropicProvider::with_client(client);

        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.version(), semver::Version::new(0, 1, 0));
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
        assert_eq!(provider.health_check().await.unwrap(), HealthStatus::Healthy);
    }
}
