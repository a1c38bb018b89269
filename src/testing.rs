// src/testing.rs
//! In-memory collaborators for unit tests.

use crate::error::{ProviderError, PublishingError};
use crate::providers::{Prompt, TextGenerator};
use crate::publishing::{
    MediaDescriptor, PostDraft, PostResult, PostUpdate, PostUpdateResult, PublishingClient,
};
use crate::types::{ModelParams, PostId, ProviderId};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum Script {
    Reply(String),
    Fail { status: u16, message: String },
    Panic,
}

/// A text generator that answers from a script and records its prompts.
pub struct ScriptedGenerator {
    provider: ProviderId,
    script: Script,
    delay: Duration,
    fail_topics: HashSet<String>,
    prompts: Arc<Mutex<Vec<Prompt>>>,
}

impl ScriptedGenerator {
    fn with_script(provider: ProviderId, script: Script) -> Self {
        Self {
            provider,
            script,
            delay: Duration::ZERO,
            fail_topics: HashSet::new(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(provider: ProviderId, text: &str) -> Self {
        Self::with_script(provider, Script::Reply(text.to_string()))
    }

    pub fn failing(provider: ProviderId, status: u16, message: &str) -> Self {
        Self::with_script(
            provider,
            Script::Fail {
                status,
                message: message.to_string(),
            },
        )
    }

    pub fn panicking(provider: ProviderId) -> Self {
        Self::with_script(provider, Script::Panic)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fails with a 500 whenever the prompt mentions `topic`.
    pub fn failing_for(mut self, topic: &str) -> Self {
        self.fail_topics.insert(topic.to_string());
        self
    }

    pub fn prompts(&self) -> Arc<Mutex<Vec<Prompt>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedGenerator {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        _params: &ModelParams,
    ) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self
            .fail_topics
            .iter()
            .any(|topic| prompt.user.contains(topic.as_str()))
        {
            return Err(ProviderError::Service {
                provider: self.provider,
                status: 500,
                message: "scripted topic failure".to_string(),
            });
        }

        match &self.script {
            Script::Reply(text) => Ok(format!("{} on {}", text, first_line(&prompt.user))),
            Script::Fail { status, message } => Err(ProviderError::Service {
                provider: self.provider,
                status: *status,
                message: message.clone(),
            }),
            Script::Panic => panic!("scripted provider panic"),
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

/// A publishing client that records drafts and hands out sequential ids.
pub struct RecordingPublisher {
    next_id: AtomicU64,
    drafts: Arc<Mutex<Vec<PostDraft>>>,
    fail_titles: HashSet<String>,
    delays: Vec<(String, Duration)>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            drafts: Arc::new(Mutex::new(Vec::new())),
            fail_titles: HashSet::new(),
            delays: Vec::new(),
        }
    }

    /// Rejects drafts whose title contains `fragment`.
    pub fn rejecting(mut self, fragment: &str) -> Self {
        self.fail_titles.insert(fragment.to_string());
        self
    }

    /// Delays drafts whose title contains `fragment`.
    pub fn delaying(mut self, fragment: &str, delay: Duration) -> Self {
        self.delays.push((fragment.to_string(), delay));
        self
    }

    pub fn drafts(&self) -> Arc<Mutex<Vec<PostDraft>>> {
        Arc::clone(&self.drafts)
    }
}

impl Default for RecordingPublisher {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase, hyphen-separated slug of a title.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[async_trait::async_trait]
impl PublishingClient for RecordingPublisher {
    async fn create_post(&self, draft: &PostDraft) -> Result<PostResult, PublishingError> {
        if let Some((_, delay)) = self
            .delays
            .iter()
            .find(|(fragment, _)| draft.title.contains(fragment.as_str()))
        {
            tokio::time::sleep(*delay).await;
        }

        if self
            .fail_titles
            .iter()
            .any(|fragment| draft.title.contains(fragment.as_str()))
        {
            return Err(PublishingError::Service {
                status: 401,
                message: "Sorry, you are not allowed to create posts.".to_string(),
            });
        }

        self.drafts.lock().unwrap().push(draft.clone());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(PostResult {
            id: PostId::new(id),
            status: draft.status,
            url: format!("https://elidoras.example/{}/", slugify(&draft.title)),
        })
    }

    async fn update_post(
        &self,
        id: PostId,
        update: &PostUpdate,
    ) -> Result<PostUpdateResult, PublishingError> {
        Ok(PostUpdateResult {
            id,
            success: true,
            status: update
                .status
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| "unchanged".to_string()),
        })
    }

    async fn upload_media(
        &self,
        path: &Path,
        filename: Option<&str>,
    ) -> Result<MediaDescriptor, PublishingError> {
        let filename = filename
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        Ok(MediaDescriptor {
            id: 1,
            url: format!("https://elidoras.example/uploads/{}", filename),
            mime_type: crate::publishing::mime_type_for(path).to_string(),
            filename,
        })
    }
}
