// src/providers/http.rs
//! Shared request plumbing for provider clients.

use crate::error::{describe_error_body, ProviderError};
use crate::types::ProviderId;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds the reqwest client shared by provider and publishing clients.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("airth/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Sends a prepared request and decodes a successful JSON body.
///
/// Non-2xx statuses become [`ProviderError::Service`] with the provider's
/// own error message when the body carries one.
pub(super) async fn send_json<R: DeserializeOwned>(
    provider: ProviderId,
    request: RequestBuilder,
) -> Result<R, ProviderError> {
    // Request URLs may carry credentials
    let transport = |source: reqwest::Error| ProviderError::Transport {
        provider,
        source: source.without_url(),
    };

    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    log::debug!("{} responded with {} ({} bytes)", provider, status, body.len());

    if !status.is_success() {
        return Err(ProviderError::Service {
            provider,
            status: status.as_u16(),
            message: describe_error_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::MalformedResponse {
        provider,
        reason: e.to_string(),
    })
}

/// Rejects completions that carry no visible text.
pub(super) fn non_empty(provider: ProviderId, text: String) -> Result<String, ProviderError> {
    if text.trim().is_empty() {
        Err(ProviderError::EmptyCompletion { provider })
    } else {
        Ok(text)
    }
}
