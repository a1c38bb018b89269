// src/publishing/mod.rs
//! Publishing: the ability to place an article in the content-management system.
//!
//! The orchestrator depends on [`PublishingClient`] only. The WordPress
//! REST client is the production implementation.

mod media;
mod wordpress;

use crate::error::PublishingError;
use crate::types::PostId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub use media::mime_type_for;
pub use wordpress::{WordPressClient, WordPressCredentials};

/// Lifecycle state of a post in the publishing target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Pending,
    Private,
    Publish,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Private => "private",
            Self::Publish => "publish",
        }
    }

    /// Parses a status reported by the publishing target. Statuses the
    /// pipeline never requests (`future`, `trash`, ...) yield `None`.
    pub fn from_wire(status: &str) -> Option<Self> {
        match status {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "private" => Some(Self::Private),
            "publish" => Some(Self::Publish),
            _ => None,
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A post ready to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// What the publishing target reports after creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostResult {
    pub id: PostId,
    pub status: PostStatus,
    pub url: String,
}

/// Fields to change on an existing post. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none()
    }
}

/// Result of an update; `status` reads `"unchanged"` when no status was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostUpdateResult {
    pub id: PostId,
    pub success: bool,
    pub status: String,
}

/// An uploaded media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub id: u64,
    pub url: String,
    pub mime_type: String,
    pub filename: String,
}

/// The ability to create and maintain posts in a content-management system.
#[async_trait::async_trait]
pub trait PublishingClient: Send + Sync {
    async fn create_post(&self, draft: &PostDraft) -> Result<PostResult, PublishingError>;

    async fn update_post(
        &self,
        id: PostId,
        update: &PostUpdate,
    ) -> Result<PostUpdateResult, PublishingError>;

    /// Uploads a local file. `filename` defaults to the path's file name.
    async fn upload_media(
        &self,
        path: &Path,
        filename: Option<&str>,
    ) -> Result<MediaDescriptor, PublishingError>;
}
