// src/pipeline.rs
//! Pipeline capability traits: abstract the stages the orchestrator drives.
//!
//! Publishing is abstracted by [`crate::publishing::PublishingClient`];
//! generation by [`ArticleSource`], so each stage can be tested in isolation.

use crate::assembler::ArticleResult;
use crate::types::{GenerationContext, Topic};

/// Produces a finished article for a topic.
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    async fn generate(&self, topic: &Topic, context: Option<&GenerationContext>) -> ArticleResult;
}
