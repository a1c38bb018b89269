// src/types/provider.rs
//! Provider identity and per-call model parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The text-generation providers the pipeline knows how to call.
///
/// Declaration order is the merge priority: OpenAI output always leads the
/// article, Anthropic follows, Gemini closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderId {
    /// All providers in merge priority order.
    pub const ALL: [ProviderId; 3] = [Self::OpenAi, Self::Anthropic, Self::Gemini];

    /// Human-readable name used in the article footer.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI GPT-4",
            Self::Anthropic => "Anthropic Claude",
            Self::Gemini => "Google Gemini",
        }
    }

    /// Stable lowercase identifier for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Model selection and sampling parameters for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ModelParams {
    pub fn new(model: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// The parameters used when configuration does not override them.
    pub fn default_for(provider: ProviderId) -> Self {
        use crate::constants::{
            ANTHROPIC_DEFAULT_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
            GEMINI_DEFAULT_MODEL, OPENAI_DEFAULT_MODEL,
        };

        let model = match provider {
            ProviderId::OpenAi => OPENAI_DEFAULT_MODEL,
            ProviderId::Anthropic => ANTHROPIC_DEFAULT_MODEL,
            ProviderId::Gemini => GEMINI_DEFAULT_MODEL,
        };
        Self::new(model, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE)
    }
}
