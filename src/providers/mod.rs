// src/providers/mod.rs
//! Text generation: the ability to turn a prompt into prose.
//!
//! Business logic depends on [`TextGenerator`], never on HTTP details.
//! Each provider module is a thin reqwest client speaking one vendor's
//! wire format.

mod anthropic;
mod gemini;
mod http;
mod openai;

use crate::error::ProviderError;
use crate::types::{ModelParams, ProviderId};

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use http::build_http_client;
pub use openai::OpenAiClient;

/// A prompt as sent to one provider: optional system instruction plus user text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: Option<String>,
    pub user: String,
}

impl Prompt {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            system: None,
            user: text.into(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// The ability to generate text from a prompt.
///
/// Implementations report their failures as [`ProviderError`]; they never
/// retry and never panic on a bad response.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Which provider this client talks to.
    fn provider(&self) -> ProviderId;

    async fn generate(&self, prompt: &Prompt, params: &ModelParams)
        -> Result<String, ProviderError>;
}

/// The outcome of one provider call, consumed once by the merge step.
#[derive(Debug)]
pub struct ProviderResult {
    pub provider: ProviderId,
    pub outcome: Result<String, ProviderError>,
}

impl ProviderResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
