// src/providers/anthropic.rs
//! Anthropic messages API client.

use super::http::{non_empty, send_json};
use super::{Prompt, TextGenerator};
use crate::constants::ANTHROPIC_API_VERSION;
use crate::error::ProviderError;
use crate::types::{ApiKey, ModelParams, ProviderId, SiteUrl};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct AnthropicClient {
    client: Client,
    api_key: ApiKey,
    base_url: SiteUrl,
}

impl AnthropicClient {
    pub fn new(client: Client, api_key: ApiKey, base_url: SiteUrl) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[async_trait::async_trait]
impl TextGenerator for AnthropicClient {
    fn provider(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        params: &ModelParams,
    ) -> Result<String, ProviderError> {
        let body = MessagesRequest {
            model: &params.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system: prompt.system.as_deref(),
            messages: [UserMessage {
                role: "user",
                content: &prompt.user,
            }],
        };

        let url = self.base_url.endpoint("v1/messages");
        log::debug!("POST {} (model {})", url, params.model);
        let request = self
            .client
            .post(url)
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&body);

        let response: MessagesResponse = send_json(ProviderId::Anthropic, request).await?;
        let text = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n\n");

        non_empty(ProviderId::Anthropic, text)
    }
}
