// src/providers/gemini.rs
//! Google Gemini `generateContent` client.

use super::http::{non_empty, send_json};
use super::{Prompt, TextGenerator};
use crate::error::ProviderError;
use crate::types::{ApiKey, ModelParams, ProviderId, SiteUrl};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct GeminiClient {
    client: Client,
    api_key: ApiKey,
    base_url: SiteUrl,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: ApiKey, base_url: SiteUrl) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    fn provider(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        params: &ModelParams,
    ) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: &prompt.user }],
            }],
            system_instruction: prompt.system.as_deref().map(|text| SystemInstruction {
                parts: [Part { text }],
            }),
            generation_config: GenerationConfig {
                max_output_tokens: params.max_tokens,
                temperature: params.temperature,
            },
        };

        let url = self
            .base_url
            .endpoint(&format!("v1beta/models/{}:generateContent", params.model));
        log::debug!("POST {}", url);
        let request = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body);

        let response: GenerateResponse = send_json(ProviderId::Gemini, request).await?;
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        non_empty(ProviderId::Gemini, text)
    }
}
