// src/orchestrator/outcome.rs
//! Per-topic outcomes and the stages a topic moves through.

use crate::types::{PostId, Topic};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Where a topic is in the pipeline.
///
/// `GenerationFailed` and `PostingFailed` both surface as
/// [`OutcomeStatus::Error`]; only the error message names the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStage {
    Pending,
    Generating,
    GenerationFailed,
    Generated,
    Posting,
    PostingFailed,
    Posted,
}

impl TopicStage {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::GenerationFailed | Self::PostingFailed | Self::Posted
        )
    }
}

impl fmt::Display for TopicStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Generating => "generating",
            Self::GenerationFailed => "generation failed",
            Self::Generated => "generated",
            Self::Posting => "posting",
            Self::PostingFailed => "posting failed",
            Self::Posted => "posted",
        };
        write!(f, "{}", name)
    }
}

/// Caller-facing status of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Wall-clock time spent in each stage of one topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageTimings {
    #[serde(rename = "generation_secs", serialize_with = "as_secs")]
    pub generation: Duration,
    #[serde(rename = "posting_secs", serialize_with = "as_secs")]
    pub posting: Duration,
    #[serde(rename = "total_secs", serialize_with = "as_secs")]
    pub total: Duration,
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Terminal result of a topic: a created post or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum OutcomeResult {
    #[serde(rename = "success")]
    Posted { post_id: PostId, post_url: String },
    #[serde(rename = "error")]
    Failed { error: String },
}

/// Everything a batch caller learns about one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicOutcome {
    pub topic: Topic,
    #[serde(flatten)]
    pub result: OutcomeResult,
    pub timestamp: DateTime<Utc>,
    pub timings: StageTimings,
}

impl TopicOutcome {
    pub fn posted(topic: Topic, post_id: PostId, post_url: String, timings: StageTimings) -> Self {
        Self {
            topic,
            result: OutcomeResult::Posted { post_id, post_url },
            timestamp: Utc::now(),
            timings,
        }
    }

    pub fn failed(topic: Topic, error: impl Into<String>, timings: StageTimings) -> Self {
        Self {
            topic,
            result: OutcomeResult::Failed {
                error: error.into(),
            },
            timestamp: Utc::now(),
            timings,
        }
    }

    pub fn status(&self) -> OutcomeStatus {
        match self.result {
            OutcomeResult::Posted { .. } => OutcomeStatus::Success,
            OutcomeResult::Failed { .. } => OutcomeStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == OutcomeStatus::Success
    }

    pub fn post_id(&self) -> Option<PostId> {
        match &self.result {
            OutcomeResult::Posted { post_id, .. } => Some(*post_id),
            OutcomeResult::Failed { .. } => None,
        }
    }

    pub fn post_url(&self) -> Option<&str> {
        match &self.result {
            OutcomeResult::Posted { post_url, .. } => Some(post_url),
            OutcomeResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.result {
            OutcomeResult::Failed { error } => Some(error),
            OutcomeResult::Posted { .. } => None,
        }
    }
}
