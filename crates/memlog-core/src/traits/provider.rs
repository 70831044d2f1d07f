// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for text-completion services.

use async_trait::async_trait;

use crate::error::MemlogError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse};

/// Adapter for a text-completion service.
///
/// The recall pipeline treats the provider as a black box: a request goes
/// in, the full text comes back. Retry policy, if any, lives in the adapter.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, MemlogError>;
}
