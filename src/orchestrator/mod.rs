// src/orchestrator/mod.rs
//! Batch orchestration: generate an article per topic and publish it as a draft.
//!
//! Topics run in fixed-size batches. Topics inside a batch run concurrently,
//! batches run one after another with a cooldown between them. Every input
//! topic yields exactly one [`TopicOutcome`], in input order.

mod chunking;
mod outcome;
mod status;

use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::pipeline::ArticleSource;
use crate::publishing::{PostDraft, PublishingClient};
use crate::types::{GenerationContext, Topic, TopicRequest};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;

pub use chunking::plan_chunks;
pub use outcome::{OutcomeResult, OutcomeStatus, StageTimings, TopicOutcome, TopicStage};
pub use status::SystemStatus;

/// Drives topics through generation and publishing.
///
/// Cloning is cheap; clones share the same collaborators.
#[derive(Clone)]
pub struct BatchOrchestrator {
    articles: Arc<dyn ArticleSource>,
    publisher: Arc<dyn PublishingClient>,
    config: Arc<PipelineConfig>,
}

impl BatchOrchestrator {
    pub fn new(
        articles: Arc<dyn ArticleSource>,
        publisher: Arc<dyn PublishingClient>,
        config: PipelineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            articles,
            publisher,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generates, drafts and publishes a single topic.
    ///
    /// Never fails: generation errors, publishing errors and panics inside
    /// either stage all become an error outcome.
    pub async fn process_topic(
        &self,
        topic: &Topic,
        context: Option<&GenerationContext>,
    ) -> TopicOutcome {
        let started = Instant::now();
        log::info!("Processing topic: {}", topic);
        enter(topic, TopicStage::Pending);

        let run = AssertUnwindSafe(self.run_stages(topic, context, started)).catch_unwind();
        match run.await {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("Topic '{}' panicked: {}", topic, message);
                TopicOutcome::failed(
                    topic.clone(),
                    format!("internal error: {}", message),
                    StageTimings {
                        total: started.elapsed(),
                        ..StageTimings::default()
                    },
                )
            }
        }
    }

    async fn run_stages(
        &self,
        topic: &Topic,
        context: Option<&GenerationContext>,
        started: Instant,
    ) -> TopicOutcome {
        enter(topic, TopicStage::Generating);
        let generated = self.articles.generate(topic, context).await;
        let generation = started.elapsed();

        let article = match generated {
            Ok(article) => article,
            Err(e) => {
                enter(topic, TopicStage::GenerationFailed);
                log::error!("Generation failed for '{}': {}", topic, e);
                return TopicOutcome::failed(
                    topic.clone(),
                    format!("generation failed: {}", e),
                    StageTimings {
                        generation,
                        posting: Duration::ZERO,
                        total: started.elapsed(),
                    },
                );
            }
        };
        enter(topic, TopicStage::Generated);

        let draft = self.draft_for(topic, article.content);
        enter(topic, TopicStage::Posting);
        let posting_started = Instant::now();
        let posted = self.publisher.create_post(&draft).await;
        let timings = StageTimings {
            generation,
            posting: posting_started.elapsed(),
            total: started.elapsed(),
        };

        match posted {
            Ok(post) => {
                enter(topic, TopicStage::Posted);
                log::info!(
                    "Posted '{}' as {} {} in {:.2}s",
                    topic,
                    post.status,
                    post.url,
                    timings.total.as_secs_f64()
                );
                TopicOutcome::posted(topic.clone(), post.id, post.url, timings)
            }
            Err(e) => {
                enter(topic, TopicStage::PostingFailed);
                log::error!("Publishing failed for '{}': {}", topic, e);
                TopicOutcome::failed(topic.clone(), format!("publishing failed: {}", e), timings)
            }
        }
    }

    fn draft_for(&self, topic: &Topic, content: String) -> PostDraft {
        let defaults = &self.config.post_defaults;
        PostDraft {
            title: defaults.title_for(topic),
            content,
            status: defaults.status,
            categories: defaults.categories.clone(),
            tags: defaults.tags.clone(),
        }
    }

    /// Processes topics in batches, returning one outcome per request in input order.
    pub async fn process_batch(&self, requests: Vec<TopicRequest>) -> Vec<TopicOutcome> {
        let batch = &self.config.batch;
        let chunks = plan_chunks(requests.len(), batch.batch_size);
        log::info!(
            "Processing {} topic(s) in {} batch(es) of up to {}",
            requests.len(),
            chunks.len(),
            batch.batch_size
        );

        let mut slots: Vec<Option<TopicOutcome>> = requests.iter().map(|_| None).collect();

        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 {
                log::info!(
                    "Cooling down for {}s before batch {}/{}",
                    batch.cooldown.as_secs(),
                    index + 1,
                    chunks.len()
                );
                tokio::time::sleep(batch.cooldown).await;
            }
            log::info!("Starting batch {}/{}", index + 1, chunks.len());

            let mut join_set = JoinSet::new();
            for position in chunk.clone() {
                let orchestrator = self.clone();
                let request = requests[position].clone();
                join_set.spawn(async move {
                    let outcome = orchestrator
                        .process_topic(&request.topic, request.context.as_ref())
                        .await;
                    (position, outcome)
                });
            }

            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((position, outcome)) => slots[position] = Some(outcome),
                    Err(e) => log::error!("Topic task did not complete: {}", e),
                }
            }
        }

        let outcomes: Vec<TopicOutcome> = slots
            .into_iter()
            .zip(requests)
            .map(|(slot, request)| {
                slot.unwrap_or_else(|| {
                    TopicOutcome::failed(
                        request.topic,
                        "internal error: topic task did not complete",
                        StageTimings::default(),
                    )
                })
            })
            .collect();

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        log::info!(
            "Batch complete: {} succeeded, {} failed",
            succeeded,
            outcomes.len() - succeeded
        );
        outcomes
    }

    /// [`process_batch`](Self::process_batch) for topics without context.
    pub async fn process_topics(&self, topics: Vec<Topic>) -> Vec<TopicOutcome> {
        self.process_batch(topics.into_iter().map(TopicRequest::new).collect())
            .await
    }

    pub fn system_status(&self) -> SystemStatus {
        SystemStatus::from_config(&self.config)
    }
}

fn enter(topic: &Topic, stage: TopicStage) {
    log::debug!("Topic '{}' -> {}", topic, stage);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
