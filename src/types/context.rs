// src/types/context.rs
//! Optional generation hints and the topic requests that carry them.

use super::Topic;
use serde::{Deserialize, Serialize};

/// Structured hints that shape the prompts sent to every provider.
///
/// All fields are optional; absent fields deserialize to empty and are
/// simply left out of the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationContext {
    pub style: Option<String>,
    pub themes: Vec<String>,
    pub references: Vec<String>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_themes<I, S>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.themes = themes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    /// The style hint, if one was given and is not blank.
    pub fn style(&self) -> Option<&str> {
        self.style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether any hint would change a prompt.
    pub fn is_empty(&self) -> bool {
        self.style().is_none() && self.themes.is_empty() && self.references.is_empty()
    }
}

/// One entry of a batch: a topic and its optional context.
///
/// Accepts either a bare string or `{ "topic": ..., "context": {...} }`
/// when read from a topics file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTopicRequest")]
pub struct TopicRequest {
    pub topic: Topic,
    pub context: Option<GenerationContext>,
}

impl TopicRequest {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            context: None,
        }
    }

    pub fn with_context(mut self, context: GenerationContext) -> Self {
        self.context = Some(context);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTopicRequest {
    Bare(Topic),
    Detailed {
        topic: Topic,
        #[serde(default)]
        context: Option<GenerationContext>,
    },
}

impl From<RawTopicRequest> for TopicRequest {
    fn from(raw: RawTopicRequest) -> Self {
        match raw {
            RawTopicRequest::Bare(topic) => TopicRequest::new(topic),
            RawTopicRequest::Detailed { topic, context } => TopicRequest { topic, context },
        }
    }
}
