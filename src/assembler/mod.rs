// src/assembler/mod.rs
//! Article assembly: fan a topic out to every provider and merge the answers.
//!
//! A provider failure only removes that provider's section. The assembly
//! fails when no provider produced text.

mod merge;
mod prompt;

use crate::error::{AssemblyError, ProviderError};
use crate::pipeline::ArticleSource;
use crate::providers::{ProviderResult, TextGenerator};
use crate::types::{GenerationContext, ModelParams, ProviderId, Topic};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;

pub use merge::{merge_sections, section_header};
pub use prompt::build_prompt;

/// Outcome of assembling one topic.
pub type ArticleResult = Result<Article, AssemblyError>;

/// A merged article ready for publishing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub content: String,
    pub metadata: ArticleMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleMetadata {
    pub topic: Topic,
    pub generated_at: DateTime<Utc>,
    /// Contributing providers, in priority order.
    pub providers_used: Vec<ProviderId>,
    pub context_provided: bool,
}

/// A configured provider: the client and the parameters it is called with.
#[derive(Clone)]
pub struct ProviderSlot {
    generator: Arc<dyn TextGenerator>,
    params: ModelParams,
}

impl ProviderSlot {
    pub fn new(generator: Arc<dyn TextGenerator>, params: ModelParams) -> Self {
        Self { generator, params }
    }

    pub fn provider(&self) -> ProviderId {
        self.generator.provider()
    }

    async fn call(&self, topic: &Topic, context: Option<&GenerationContext>) -> ProviderResult {
        let provider = self.provider();
        let prompt = build_prompt(provider, topic, context);
        log::debug!("Requesting {} ({}) for '{}'", provider, self.params.model, topic);
        ProviderResult {
            provider,
            outcome: self.generator.generate(&prompt, &self.params).await,
        }
    }
}

/// Builds multi-provider articles. Stateless apart from its provider list.
pub struct ArticleAssembler {
    slots: Vec<ProviderSlot>,
}

impl ArticleAssembler {
    /// Creates an assembler; providers are kept in merge priority order.
    pub fn new(mut slots: Vec<ProviderSlot>) -> Self {
        slots.sort_by_key(ProviderSlot::provider);
        Self { slots }
    }

    /// Providers in the order their sections appear.
    pub fn providers(&self) -> Vec<ProviderId> {
        self.slots.iter().map(ProviderSlot::provider).collect()
    }

    /// Generates and merges an article for `topic`.
    ///
    /// All providers are called concurrently; results come back indexed by
    /// priority, not completion order.
    pub async fn generate(
        &self,
        topic: &Topic,
        context: Option<&GenerationContext>,
    ) -> ArticleResult {
        if self.slots.is_empty() {
            return Err(AssemblyError::NoProviders {
                topic: topic.clone(),
            });
        }

        log::info!(
            "Generating '{}' with {} provider(s)",
            topic,
            self.slots.len()
        );
        let results = join_all(self.slots.iter().map(|slot| slot.call(topic, context))).await;
        log::debug!(
            "{} of {} provider(s) answered for '{}'",
            results.iter().filter(|r| r.is_success()).count(),
            results.len(),
            topic
        );

        assemble(topic, context, results, Utc::now())
    }
}

/// Decides overall success from the per-provider results and merges the successes.
fn assemble(
    topic: &Topic,
    context: Option<&GenerationContext>,
    results: Vec<ProviderResult>,
    generated_at: DateTime<Utc>,
) -> ArticleResult {
    let mut sections = Vec::with_capacity(results.len());
    let mut first_error: Option<ProviderError> = None;

    for result in results {
        match result.outcome {
            Ok(text) => sections.push((result.provider, text)),
            Err(error) => {
                log::warn!("Provider {} failed for '{}': {}", result.provider, topic, error);
                first_error.get_or_insert(error);
            }
        }
    }

    if sections.is_empty() {
        return Err(match first_error {
            Some(first_error) => AssemblyError::AllProvidersFailed {
                topic: topic.clone(),
                first_error,
            },
            None => AssemblyError::NoProviders {
                topic: topic.clone(),
            },
        });
    }

    let content = merge_sections(&sections, generated_at.date_naive());
    Ok(Article {
        content,
        metadata: ArticleMetadata {
            topic: topic.clone(),
            generated_at,
            providers_used: sections.into_iter().map(|(provider, _)| provider).collect(),
            context_provided: context.is_some(),
        },
    })
}

#[async_trait::async_trait]
impl ArticleSource for ArticleAssembler {
    async fn generate(&self, topic: &Topic, context: Option<&GenerationContext>) -> ArticleResult {
        ArticleAssembler::generate(self, topic, context).await
    }
}
