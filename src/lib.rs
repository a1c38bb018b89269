// src/lib.rs
//! airth library: multi-provider article generation and batch publishing.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ProviderError`, `AssemblyError`, `PublishingError`
//! - **Configuration**: `PipelineConfig`, `ServiceConfig`, `CommandLineInput`
//! - **Domain types**: `Topic`, `GenerationContext`, `ProviderId`, `PostId`, etc.
//! - **Providers**: `TextGenerator` and the OpenAI, Anthropic and Gemini clients
//! - **Assembly**: `ArticleAssembler`, `ProviderSlot`, `Article`
//! - **Publishing**: `PublishingClient`, `WordPressClient`
//! - **Orchestration**: `BatchOrchestrator`, `TopicOutcome`, `BatchSummary`

mod analytics;
mod assembler;
mod config;
pub mod constants;
mod error;
mod orchestrator;
mod output;
mod pipeline;
mod providers;
mod publishing;
mod types;

#[cfg(test)]
mod testing;

// --- Error Handling ---
pub use crate::error::{
    describe_error_body, AppError, AssemblyError, ConfigError, ProviderError, PublishingError,
};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    load_topics, BatchSettings, CommandLineInput, PipelineConfig, PostDefaults, ProviderSettings,
    ServiceConfig,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, GenerationContext, ModelParams, PostId, ProviderId, SiteUrl, Topic, TopicRequest,
};

// --- Providers ---
pub use crate::providers::{
    build_http_client, AnthropicClient, GeminiClient, OpenAiClient, Prompt, ProviderResult,
    TextGenerator,
};

// --- Assembly ---
pub use crate::assembler::{
    build_prompt, merge_sections, section_header, Article, ArticleAssembler, ArticleMetadata,
    ArticleResult, ProviderSlot,
};

// --- Publishing ---
pub use crate::publishing::{
    mime_type_for, MediaDescriptor, PostDraft, PostResult, PostStatus, PostUpdate,
    PostUpdateResult, PublishingClient, WordPressClient, WordPressCredentials,
};

// --- Orchestration ---
pub use crate::analytics::{BatchSummary, SlowestTopic};
pub use crate::orchestrator::{
    plan_chunks, BatchOrchestrator, OutcomeResult, OutcomeStatus, StageTimings, SystemStatus,
    TopicOutcome, TopicStage,
};

// --- Output ---
pub use crate::output::{
    deliver, plan_delivery, render_report, BatchReport, CompletedOperation, DeliveryTarget,
    ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};

// --- Pipeline Traits ---
pub use crate::pipeline::ArticleSource;
