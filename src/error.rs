// src/error.rs
//! Application error types with structured error handling.
//!
//! Each pipeline stage owns its own error vocabulary. Provider errors
//! degrade an assembly, assembly and publishing errors become failed topic
//! outcomes, and configuration errors stop the process before any work
//! starts. `AppError` is the binary's umbrella type.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::types::{ProviderId, Topic, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

/// A single text-generation call failed.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned an error (HTTP {status}): {message}")]
    Service {
        provider: ProviderId,
        status: u16,
        message: String,
    },

    #[error("{provider} returned a malformed response: {reason}")]
    MalformedResponse { provider: ProviderId, reason: String },

    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: ProviderId },
}

impl ProviderError {
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::Transport { provider, .. }
            | Self::Service { provider, .. }
            | Self::MalformedResponse { provider, .. }
            | Self::EmptyCompletion { provider } => *provider,
        }
    }

    /// Whether the provider rejected the request for quota reasons.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Service { status: 429, .. })
    }
}

/// No article could be assembled for a topic.
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("{first_error}")]
    AllProvidersFailed {
        topic: Topic,
        first_error: ProviderError,
    },

    #[error("no text-generation providers are configured")]
    NoProviders { topic: Topic },
}

impl AssemblyError {
    pub fn topic(&self) -> &Topic {
        match self {
            Self::AllProvidersFailed { topic, .. } | Self::NoProviders { topic } => topic,
        }
    }
}

/// A call to the publishing target failed.
#[derive(Error, Debug)]
pub enum PublishingError {
    #[error("Publishing request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Publishing service returned an error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Malformed publishing response: {0}")]
    MalformedResponse(String),

    #[error("Failed to read media file {path}: {source}")]
    MediaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Missing or malformed configuration. Fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read topics from {path}: {source}")]
    TopicsFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No topics to process")]
    NoTopics,

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: format!("{:#}", err),
            source: None,
        }
    }
}

/// Extracts a human-readable message from an error response body.
///
/// Provider and WordPress error bodies carry the message under
/// `error.message`, `message`, or a bare string `error`. Anything else is
/// shown as a truncated preview of the raw body.
pub fn describe_error_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = value
            .pointer("/error/message")
            .or_else(|| value.get("message"))
            .or_else(|| value.get("error"))
            .and_then(serde_json::Value::as_str);
        if let Some(message) = message {
            return message.to_string();
        }
    }
    preview_body(body)
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    if trimmed.chars().count() <= ERROR_BODY_PREVIEW_LENGTH {
        return trimmed.to_string();
    }
    let preview: String = trimmed.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
    format!("{}...", preview)
}
