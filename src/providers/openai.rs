// src/providers/openai.rs
//! OpenAI chat completions client.

use super::http::{non_empty, send_json};
use super::{Prompt, TextGenerator};
use crate::error::ProviderError;
use crate::types::{ApiKey, ModelParams, ProviderId, SiteUrl};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct OpenAiClient {
    client: Client,
    api_key: ApiKey,
    base_url: SiteUrl,
}

impl OpenAiClient {
    pub fn new(client: Client, api_key: ApiKey, base_url: SiteUrl) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiClient {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        params: &ModelParams,
    ) -> Result<String, ProviderError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &prompt.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &prompt.user,
        });

        let body = ChatRequest {
            model: &params.model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        let url = self.base_url.endpoint("v1/chat/completions");
        log::debug!("POST {} (model {})", url, params.model);
        let request = self
            .client
            .post(url)
            .bearer_auth(self.api_key.as_str())
            .json(&body);

        let response: ChatResponse = send_json(ProviderId::OpenAi, request).await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        non_empty(ProviderId::OpenAi, text)
    }
}
