use airth::{
    load_topics, ArticleAssembler, BatchOrchestrator, BatchSettings, BatchSummary,
    CommandLineInput, GenerationContext, MediaDescriptor, ModelParams, OutcomeStatus,
    PipelineConfig, PostDraft, PostId, PostResult, PostUpdate, PostUpdateResult, Prompt,
    ProviderError, ProviderId, ProviderSlot, PublishingClient, PublishingError, TextGenerator,
    Topic,
};
use clap::Parser;
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers with the provider name and the prompt's first line.
struct EchoGenerator {
    provider: ProviderId,
    down: bool,
}

#[async_trait::async_trait]
impl TextGenerator for EchoGenerator {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn generate(&self, prompt: &Prompt, _params: &ModelParams) -> Result<String, ProviderError> {
        if self.down {
            return Err(ProviderError::Service {
                provider: self.provider,
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        let first_line = prompt.user.lines().next().unwrap_or_default();
        Ok(format!("{} says: {}", self.provider.as_str(), first_line))
    }
}

#[derive(Default)]
struct MemoryPublisher {
    next_id: AtomicU64,
    posts: Mutex<Vec<PostDraft>>,
}

#[async_trait::async_trait]
impl PublishingClient for MemoryPublisher {
    async fn create_post(&self, draft: &PostDraft) -> Result<PostResult, PublishingError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.posts.lock().unwrap().push(draft.clone());
        Ok(PostResult {
            id: PostId::new(id),
            status: draft.status,
            url: format!("https://elidoras.example/?p={}", id),
        })
    }

    async fn update_post(
        &self,
        id: PostId,
        _update: &PostUpdate,
    ) -> Result<PostUpdateResult, PublishingError> {
        Ok(PostUpdateResult {
            id,
            success: true,
            status: "unchanged".to_string(),
        })
    }

    async fn upload_media(
        &self,
        _path: &Path,
        _filename: Option<&str>,
    ) -> Result<MediaDescriptor, PublishingError> {
        Err(PublishingError::MalformedResponse(
            "media not supported".to_string(),
        ))
    }
}

fn assembler(down: &[ProviderId]) -> ArticleAssembler {
    ArticleAssembler::new(
        ProviderId::ALL
            .iter()
            .map(|&provider| {
                let generator = EchoGenerator {
                    provider,
                    down: down.contains(&provider),
                };
                ProviderSlot::new(Arc::new(generator), ModelParams::default_for(provider))
            })
            .collect(),
    )
}

fn orchestrator(
    assembler: ArticleAssembler,
    publisher: Arc<MemoryPublisher>,
    batch_size: usize,
    cooldown: Duration,
) -> BatchOrchestrator {
    let config = PipelineConfig::default().with_batch(BatchSettings {
        batch_size,
        cooldown,
        max_daily_posts: 20,
    });
    BatchOrchestrator::new(Arc::new(assembler), publisher, config).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_topics_file_runs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let topics_file = dir.path().join("topics.json");
    std::fs::write(
        &topics_file,
        r#"[
            "The Library of Alexandria",
            { "topic": "Norse runes and cryptography",
              "context": { "style": "scholarly", "themes": ["futhark", "ciphers"] } },
            "Gnostic cosmology"
        ]"#,
    )
    .unwrap();
    let cli = CommandLineInput::parse_from([
        "airth",
        topics_file.to_str().unwrap(),
        "--topic",
        "Sacred geometry",
    ]);
    let requests = load_topics(&cli).unwrap();
    assert_eq!(requests.len(), 4);
    assert!(requests[1].context.is_some());

    let publisher = Arc::new(MemoryPublisher::default());
    let orchestrator = orchestrator(
        assembler(&[]),
        Arc::clone(&publisher),
        2,
        Duration::from_secs(300),
    );

    let outcomes = orchestrator.process_batch(requests).await;

    let topics: Vec<&str> = outcomes.iter().map(|o| o.topic.as_str()).collect();
    assert_eq!(
        topics,
        vec![
            "The Library of Alexandria",
            "Norse runes and cryptography",
            "Gnostic cosmology",
            "Sacred geometry"
        ]
    );
    assert!(outcomes.iter().all(|o| o.status() == OutcomeStatus::Success));

    let posts = publisher.posts.lock().unwrap();
    let runes = posts
        .iter()
        .find(|p| p.title == "AIRTH Analysis: Norse runes and cryptography")
        .unwrap();
    assert!(runes.content.contains("## Main Analysis\n\nopenai says:"));
    assert!(runes.content.contains("## Alternative Perspective\n\nanthropic says:"));
    assert!(runes.content.contains("## Additional Insights\n\ngemini says:"));
    assert_eq!(runes.content.matches("*Generated by AIRTH using:").count(), 1);

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!(summary.succeeded, 4);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn test_outage_of_every_provider_publishes_nothing() {
    let publisher = Arc::new(MemoryPublisher::default());
    let orchestrator = orchestrator(
        assembler(&ProviderId::ALL),
        Arc::clone(&publisher),
        5,
        Duration::ZERO,
    );

    let outcomes = orchestrator
        .process_topics(vec![
            Topic::new("Atlantis").unwrap(),
            Topic::new("Lemuria").unwrap(),
        ])
        .await;

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        assert_eq!(outcome.status(), OutcomeStatus::Error);
        assert!(outcome.error().unwrap().contains("service unavailable"));
    }
    assert!(publisher.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_partial_outage_still_publishes() {
    let publisher = Arc::new(MemoryPublisher::default());
    let orchestrator = orchestrator(
        assembler(&[ProviderId::OpenAi]),
        Arc::clone(&publisher),
        5,
        Duration::ZERO,
    );
    let topic = Topic::new("Digital immortality").unwrap();
    let context = GenerationContext::new().with_references(["Kurzweil, The Singularity Is Near"]);

    let outcome = orchestrator.process_topic(&topic, Some(&context)).await;

    assert!(outcome.is_success());
    let posts = publisher.posts.lock().unwrap();
    assert!(posts[0]
        .content
        .starts_with("## Main Analysis\n\nanthropic says:"));
    assert!(posts[0]
        .content
        .contains("using: Anthropic Claude, Google Gemini*"));
}

#[tokio::test]
async fn test_report_serialization_matches_outcomes() {
    let publisher = Arc::new(MemoryPublisher::default());
    let orchestrator = orchestrator(assembler(&[]), publisher, 5, Duration::ZERO);

    let outcomes = orchestrator
        .process_topics(vec![Topic::new("Alchemy").unwrap()])
        .await;
    let report = airth::BatchReport::new("AIRTH", "0.1.0", &outcomes);
    let json: serde_json::Value =
        serde_json::from_str(&airth::render_report(&report).unwrap()).unwrap();

    assert_eq!(json["outcomes"][0]["status"], "success");
    assert_eq!(json["outcomes"][0]["post_id"], 1);
    assert_eq!(json["outcomes"][0]["post_url"], "https://elidoras.example/?p=1");
    assert_eq!(json["summary"]["total"], 1);
}
