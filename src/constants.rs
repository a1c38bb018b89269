// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you how the pipeline
//! behaves when configuration leaves something unsaid.

// ---------------------------------------------------------------------------
// System identity
// ---------------------------------------------------------------------------

/// Name reported by the status endpoint and signed into every article footer.
pub const SYSTEM_NAME: &str = "AIRTH";

/// Version reported by the status endpoint.
pub const SYSTEM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The publication every prompt writes for.
pub const PUBLICATION_NAME: &str = "The Elidoras Codex";

// ---------------------------------------------------------------------------
// Batch pacing
// ---------------------------------------------------------------------------

/// How many topics run concurrently before the orchestrator pauses.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Pause between batches, in minutes.
///
/// Provider and publishing quotas are per-minute; a short pause between
/// batches keeps a long topic list under them.
pub const DEFAULT_COOLDOWN_MINUTES: u64 = 5;

/// Upper bound on drafts per day, echoed in the system status.
pub const DEFAULT_MAX_DAILY_POSTS: u32 = 20;

// ---------------------------------------------------------------------------
// Publishing defaults
// ---------------------------------------------------------------------------

/// Prefix joined to the topic to form a post title.
pub const POST_TITLE_PREFIX: &str = "AIRTH Analysis: ";

pub const DEFAULT_CATEGORIES: &[&str] = &["AI Analysis", "AIRTH"];

pub const DEFAULT_TAGS: &[&str] = &["ai-generated", "airth", "analysis"];

// ---------------------------------------------------------------------------
// Provider defaults
// ---------------------------------------------------------------------------

pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4";
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-opus-20240229";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-pro";

pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com";
pub const ANTHROPIC_API_BASE_URL: &str = "https://api.anthropic.com";
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Anthropic API version header value.
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Token budget per provider call. Long-form articles need room.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Request timeout for provider and publishing calls, in seconds.
///
/// Long completions routinely take a minute or more.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

// ---------------------------------------------------------------------------
// Article layout
// ---------------------------------------------------------------------------

/// Section headers assigned to successful provider outputs, in order.
/// Outputs beyond this list get a numbered "Further Perspective" header.
pub const SECTION_HEADERS: &[&str] = &[
    "Main Analysis",
    "Alternative Perspective",
    "Additional Insights",
];

/// Separator between article sections and before the footer.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
