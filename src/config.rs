// src/config.rs
//! Command-line and environment configuration, resolved once into
//! immutable snapshots.
//!
//! [`PipelineConfig`] is everything the orchestrator needs and is free of
//! secrets. [`ServiceConfig`] carries the credentials and endpoints used to
//! build the provider and publishing clients.

use crate::constants::*;
use crate::error::{AppError, ConfigError};
use crate::publishing::{PostStatus, WordPressCredentials};
use crate::types::{ApiKey, ModelParams, ProviderId, SiteUrl, Topic, TopicRequest};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// JSON file with topics: an array of strings or {"topic", "context"} objects
    pub topics_file: Option<PathBuf>,

    /// Additional topic to process (repeatable)
    #[arg(short = 't', long = "topic")]
    pub topics: Vec<String>,

    /// Number of topics processed concurrently per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Pause between batches, in minutes
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_MINUTES)]
    pub cooldown_minutes: u64,

    /// Daily post ceiling reported in the system status
    #[arg(long, default_value_t = DEFAULT_MAX_DAILY_POSTS)]
    pub max_daily_posts: u32,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Print the system status and exit
    #[arg(long, default_value_t = false)]
    pub status: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// HTTP request timeout in seconds for provider and publishing calls
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Override the OpenAI model
    #[arg(long)]
    pub openai_model: Option<String>,

    /// Override the Anthropic model
    #[arg(long)]
    pub anthropic_model: Option<String>,

    /// Override the Gemini model
    #[arg(long)]
    pub gemini_model: Option<String>,

    /// Token budget per provider call
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Sampling temperature per provider call (0.0 - 2.0)
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,
}

/// How topics are paced through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSettings {
    pub batch_size: usize,
    pub cooldown: Duration,
    pub max_daily_posts: u32,
}

impl BatchSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid {
                field: "batch_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_MINUTES * 60),
            max_daily_posts: DEFAULT_MAX_DAILY_POSTS,
        }
    }
}

/// Fixed attributes of every post the pipeline creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDefaults {
    pub title_prefix: String,
    pub status: PostStatus,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl PostDefaults {
    pub fn title_for(&self, topic: &Topic) -> String {
        format!("{}{}", self.title_prefix, topic)
    }
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            title_prefix: POST_TITLE_PREFIX.to_string(),
            status: PostStatus::Draft,
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            tags: DEFAULT_TAGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The orchestrator's configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub system_name: String,
    pub system_version: String,
    pub batch: BatchSettings,
    pub post_defaults: PostDefaults,
}

impl PipelineConfig {
    /// Resolves the orchestrator settings from CLI input.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, ConfigError> {
        let config = Self {
            batch: BatchSettings {
                batch_size: cli.batch_size,
                cooldown: Duration::from_secs(cli.cooldown_minutes.saturating_mul(60)),
                max_daily_posts: cli.max_daily_posts,
            },
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_batch(mut self, batch: BatchSettings) -> Self {
        self.batch = batch;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.batch.validate()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            system_name: SYSTEM_NAME.to_string(),
            system_version: SYSTEM_VERSION.to_string(),
            batch: BatchSettings::default(),
            post_defaults: PostDefaults::default(),
        }
    }
}

/// Credentials, endpoint and parameters for one provider.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub provider: ProviderId,
    pub api_key: ApiKey,
    pub base_url: SiteUrl,
    pub params: ModelParams,
}

/// Everything needed to build the external clients.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Providers with credentials present, in priority order.
    pub providers: Vec<ProviderSettings>,
    pub wordpress: WordPressCredentials,
    pub request_timeout: Duration,
}

impl ServiceConfig {
    /// Resolves service settings from CLI input and the process environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, ConfigError> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Resolves service settings using `env` to look up variables.
    ///
    /// A provider is enabled when its API key is set; at least one must be.
    pub fn resolve_with<F>(cli: &CommandLineInput, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if cli.max_tokens == 0 {
            return Err(ConfigError::Invalid {
                field: "max_tokens",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&cli.temperature) {
            return Err(ConfigError::Invalid {
                field: "temperature",
                reason: format!("{} is outside 0.0..=2.0", cli.temperature),
            });
        }

        let mut providers = Vec::with_capacity(ProviderId::ALL.len());
        for provider in ProviderId::ALL {
            let (key_vars, base_var, default_base, model_override): (&[&str], _, _, _) =
                match provider {
                    ProviderId::OpenAi => (
                        &["OPENAI_API_KEY"][..],
                        "OPENAI_BASE_URL",
                        OPENAI_API_BASE_URL,
                        &cli.openai_model,
                    ),
                    ProviderId::Anthropic => (
                        &["ANTHROPIC_API_KEY"][..],
                        "ANTHROPIC_BASE_URL",
                        ANTHROPIC_API_BASE_URL,
                        &cli.anthropic_model,
                    ),
                    ProviderId::Gemini => (
                        &["GEMINI_API_KEY", "GOOGLE_API_KEY"][..],
                        "GEMINI_BASE_URL",
                        GEMINI_API_BASE_URL,
                        &cli.gemini_model,
                    ),
                };

            let Some(key) = key_vars.iter().find_map(|var| lookup(*var)) else {
                log::warn!("{} disabled: no API key in {}", provider, key_vars.join(" or "));
                continue;
            };

            let base_url = lookup(base_var).unwrap_or_else(|| default_base.to_string());
            let mut params = ModelParams::default_for(provider);
            if let Some(model) = model_override {
                params.model = model.clone();
            }
            params.max_tokens = cli.max_tokens;
            params.temperature = cli.temperature;

            providers.push(ProviderSettings {
                provider,
                api_key: ApiKey::new(key)?,
                base_url: SiteUrl::parse(&base_url)?,
                params,
            });
        }

        if providers.is_empty() {
            return Err(ConfigError::Missing(
                "no provider API key set (OPENAI_API_KEY, ANTHROPIC_API_KEY or GEMINI_API_KEY)"
                    .to_string(),
            ));
        }

        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                ConfigError::Missing(format!("{} environment variable not set", key))
            })
        };

        let wordpress = WordPressCredentials {
            site_url: SiteUrl::parse(&required("WP_SITE_URL")?)?,
            username: required("WP_USER")?,
            app_password: ApiKey::new(required("WP_APP_PASSWORD")?.replace(' ', ""))?,
        };

        Ok(Self {
            providers,
            wordpress,
            request_timeout: Duration::from_secs(cli.timeout_secs.max(1)),
        })
    }
}

/// Reads the batch's topic requests: the topics file first, then `--topic` entries.
pub fn load_topics(cli: &CommandLineInput) -> Result<Vec<TopicRequest>, AppError> {
    let mut requests = Vec::new();

    if let Some(path) = &cli.topics_file {
        let content = std::fs::read_to_string(path)?;
        let from_file: Vec<TopicRequest> =
            serde_json::from_str(&content).map_err(|source| AppError::TopicsFile {
                path: path.clone(),
                source,
            })?;
        log::info!("Loaded {} topic(s) from {}", from_file.len(), path.display());
        requests.extend(from_file);
    }

    for topic in &cli.topics {
        requests.push(TopicRequest::new(Topic::new(topic.as_str())?));
    }

    if requests.is_empty() {
        return Err(AppError::NoTopics);
    }
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cli(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["airth"];
        argv.extend_from_slice(args);
        CommandLineInput::parse_from(argv)
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const WORDPRESS: [(&str, &str); 3] = [
        ("WP_SITE_URL", "https://elidoras.example"),
        ("WP_USER", "editor"),
        ("WP_APP_PASSWORD", "abcd efgh ijkl mnop"),
    ];

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::resolve(&cli(&[])).unwrap();
        assert_eq!(config.system_name, "AIRTH");
        assert_eq!(config.batch.batch_size, 5);
        assert_eq!(config.batch.cooldown, Duration::from_secs(300));
        assert_eq!(config.batch.max_daily_posts, 20);
        assert_eq!(config.post_defaults.status, PostStatus::Draft);
        assert_eq!(config.post_defaults.categories, vec!["AI Analysis", "AIRTH"]);
        assert_eq!(
            config.post_defaults.tags,
            vec!["ai-generated", "airth", "analysis"]
        );
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let err = PipelineConfig::resolve(&cli(&["--batch-size", "0"])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "batch_size",
                ..
            }
        ));
    }

    #[test]
    fn test_title_uses_prefix() {
        let defaults = PostDefaults::default();
        let topic = Topic::new("Norse runes and cryptography").unwrap();
        assert_eq!(
            defaults.title_for(&topic),
            "AIRTH Analysis: Norse runes and cryptography"
        );
    }

    #[test]
    fn test_providers_enabled_by_present_keys() {
        let mut vars = WORDPRESS.to_vec();
        vars.push(("ANTHROPIC_API_KEY", "sk-ant-test"));
        vars.push(("GOOGLE_API_KEY", "gk-test"));

        let services =
            ServiceConfig::resolve_with(&cli(&["--gemini-model", "gemini-pro"]), env_from(&vars))
                .unwrap();

        let ids: Vec<_> = services.providers.iter().map(|p| p.provider).collect();
        assert_eq!(ids, vec![ProviderId::Anthropic, ProviderId::Gemini]);
        assert_eq!(services.providers[1].params.model, "gemini-pro");
        assert_eq!(
            services.providers[0].base_url.as_str(),
            "https://api.anthropic.com"
        );
        assert_eq!(services.wordpress.app_password.as_str(), "abcdefghijklmnop");
        assert_eq!(services.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_missing_provider_keys_is_fatal() {
        let err = ServiceConfig::resolve_with(&cli(&[]), env_from(&WORDPRESS)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_missing_wordpress_settings_is_fatal() {
        let err =
            ServiceConfig::resolve_with(&cli(&[]), env_from(&[("OPENAI_API_KEY", "sk-test")]))
                .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing configuration: WP_SITE_URL environment variable not set"
        );
    }

    #[test]
    fn test_out_of_range_temperature_is_rejected() {
        let mut vars = WORDPRESS.to_vec();
        vars.push(("OPENAI_API_KEY", "sk-test"));
        let err = ServiceConfig::resolve_with(&cli(&["--temperature", "3.5"]), env_from(&vars))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "temperature",
                ..
            }
        ));
    }

    #[test]
    fn test_load_topics_merges_file_and_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"[{"topic": "Norse runes and cryptography", "context": {"style": "academic"}}]"#,
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let requests = load_topics(&cli(&[path.as_str(), "--topic", "Modern grimoires"])).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].topic.as_str(), "Norse runes and cryptography");
        assert!(requests[0].context.is_some());
        assert_eq!(requests[1].topic.as_str(), "Modern grimoires");
        assert!(requests[1].context.is_none());
    }

    #[test]
    fn test_no_topics_is_an_error() {
        assert!(matches!(load_topics(&cli(&[])), Err(AppError::NoTopics)));
    }
}
