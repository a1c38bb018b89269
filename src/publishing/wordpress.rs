// src/publishing/wordpress.rs
//! WordPress REST API client (`/wp-json/wp/v2`).
//!
//! Authenticates with an application password over basic auth. Categories
//! and tags are addressed by name in the pipeline and resolved to term ids
//! here, creating terms that do not exist yet. Resolved ids are cached for
//! the life of the client.

use super::media::{mime_type_for, upload_name};
use super::{
    MediaDescriptor, PostDraft, PostResult, PostStatus, PostUpdate, PostUpdateResult,
    PublishingClient,
};
use crate::error::{describe_error_body, PublishingError};
use crate::types::{ApiKey, PostId, SiteUrl};
use futures::future::try_join_all;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::Mutex;

const REST_PREFIX: &str = "wp-json/wp/v2";

/// Site address and application-password credentials.
#[derive(Debug, Clone)]
pub struct WordPressCredentials {
    pub site_url: SiteUrl,
    pub username: String,
    pub app_password: ApiKey,
}

pub struct WordPressClient {
    client: Client,
    credentials: WordPressCredentials,
    terms: Mutex<HashMap<(Taxonomy, String), u64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Taxonomy {
    Categories,
    Tags,
}

impl Taxonomy {
    fn path(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Tags => "tags",
        }
    }
}

#[derive(Deserialize)]
struct Term {
    id: u64,
    name: String,
}

/// WordPress's answer when a create races with another writer.
#[derive(Deserialize)]
struct TermExists {
    code: String,
    data: TermExistsData,
}

#[derive(Deserialize)]
struct TermExistsData {
    term_id: u64,
}

#[derive(Serialize)]
struct NewTerm<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct NewPost<'a> {
    title: &'a str,
    content: &'a str,
    status: PostStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    categories: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<u64>,
}

#[derive(Serialize)]
struct PostChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<PostStatus>,
}

#[derive(Deserialize)]
struct PostResponse {
    id: u64,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Deserialize)]
struct MediaResponse {
    id: u64,
    source_url: String,
    #[serde(default)]
    mime_type: Option<String>,
}

impl WordPressClient {
    pub fn new(client: Client, credentials: WordPressCredentials) -> Self {
        Self {
            client,
            credentials,
            terms: Mutex::new(HashMap::new()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        self.credentials
            .site_url
            .endpoint(&format!("{}/{}", REST_PREFIX, path))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(
            &self.credentials.username,
            Some(self.credentials.app_password.as_str()),
        )
    }

    /// Permalink used when the API omits `link` for a draft.
    fn fallback_url(&self, id: u64) -> String {
        self.credentials.site_url.endpoint(&format!("?p={}", id))
    }

    /// Resolves every name to a term id, creating missing terms.
    async fn resolve_terms(
        &self,
        taxonomy: Taxonomy,
        names: &[String],
    ) -> Result<Vec<u64>, PublishingError> {
        try_join_all(names.iter().map(|name| self.resolve_term(taxonomy, name))).await
    }

    async fn resolve_term(&self, taxonomy: Taxonomy, name: &str) -> Result<u64, PublishingError> {
        let key = (taxonomy, name.to_lowercase());
        if let Some(id) = self.terms.lock().await.get(&key) {
            return Ok(*id);
        }

        let id = self.lookup_or_create_term(taxonomy, name).await?;
        self.terms.lock().await.insert(key, id);
        Ok(id)
    }

    async fn lookup_or_create_term(
        &self,
        taxonomy: Taxonomy,
        name: &str,
    ) -> Result<u64, PublishingError> {
        let search = self
            .client
            .get(self.endpoint(taxonomy.path()))
            .query(&[("search", name), ("per_page", "100")]);
        let candidates: Vec<Term> = send(self.authorized(search)).await?;

        if let Some(term) = candidates
            .iter()
            .find(|term| term.name.eq_ignore_ascii_case(name))
        {
            return Ok(term.id);
        }

        log::info!("Creating {} term '{}'", taxonomy.path(), name);
        let create = self
            .client
            .post(self.endpoint(taxonomy.path()))
            .json(&NewTerm { name });
        let (status, body, url) = fetch(self.authorized(create)).await?;

        if status.is_success() {
            return decode::<Term>(&body, &url).map(|term| term.id);
        }
        // Another topic created the same term since the search
        if let Some(id) = existing_term_id(&body) {
            log::debug!("{} term '{}' already exists as {}", taxonomy.path(), name, id);
            return Ok(id);
        }
        Err(PublishingError::Service {
            status: status.as_u16(),
            message: describe_error_body(&body),
        })
    }
}

fn existing_term_id(body: &str) -> Option<u64> {
    let exists: TermExists = serde_json::from_str(body).ok()?;
    (exists.code == "term_exists").then_some(exists.data.term_id)
}

/// Sends a request and decodes a successful JSON body.
async fn send<R: DeserializeOwned>(request: RequestBuilder) -> Result<R, PublishingError> {
    let (status, body, url) = fetch(request).await?;

    if !status.is_success() {
        return Err(PublishingError::Service {
            status: status.as_u16(),
            message: describe_error_body(&body),
        });
    }

    decode(&body, &url)
}

/// Sends a request and returns status, body and final URL without judging the status.
async fn fetch(request: RequestBuilder) -> Result<(StatusCode, String, String), PublishingError> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;

    log::debug!("WordPress {} -> {}", url, status);
    Ok((status, body, url))
}

fn decode<R: DeserializeOwned>(body: &str, url: &str) -> Result<R, PublishingError> {
    serde_json::from_str(body)
        .map_err(|e| PublishingError::MalformedResponse(format!("{} ({})", e, url)))
}

#[async_trait::async_trait]
impl PublishingClient for WordPressClient {
    async fn create_post(&self, draft: &PostDraft) -> Result<PostResult, PublishingError> {
        let (categories, tags) = futures::try_join!(
            self.resolve_terms(Taxonomy::Categories, &draft.categories),
            self.resolve_terms(Taxonomy::Tags, &draft.tags),
        )?;

        let body = NewPost {
            title: &draft.title,
            content: &draft.content,
            status: draft.status,
            categories,
            tags,
        };
        let request = self.client.post(self.endpoint("posts")).json(&body);
        let created: PostResponse = send(self.authorized(request)).await?;

        log::info!("Created {} post {} '{}'", draft.status, created.id, draft.title);

        let url = created
            .link
            .filter(|link| !link.is_empty())
            .unwrap_or_else(|| self.fallback_url(created.id));

        Ok(PostResult {
            id: PostId::new(created.id),
            status: created
                .status
                .as_deref()
                .and_then(PostStatus::from_wire)
                .unwrap_or(draft.status),
            url,
        })
    }

    async fn update_post(
        &self,
        id: PostId,
        update: &PostUpdate,
    ) -> Result<PostUpdateResult, PublishingError> {
        if update.is_empty() {
            log::debug!("Nothing to update on post {}", id);
            return Ok(PostUpdateResult {
                id,
                success: true,
                status: "unchanged".to_string(),
            });
        }

        let body = PostChanges {
            title: update.title.as_deref(),
            content: update.content.as_deref(),
            status: update.status,
        };
        let request = self
            .client
            .post(self.endpoint(&format!("posts/{}", id)))
            .json(&body);
        let updated: PostResponse = send(self.authorized(request)).await?;

        Ok(PostUpdateResult {
            id: PostId::new(updated.id),
            success: updated.id == id.value(),
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
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PublishingError::MediaRead {
                path: path.to_path_buf(),
                source,
            })?;
        let name = upload_name(path, filename);
        let mime_type = mime_type_for(path);

        log::info!("Uploading {} ({} bytes, {})", name, bytes.len(), mime_type);

        let request = self
            .client
            .post(self.endpoint("media"))
            .header(header::CONTENT_TYPE, mime_type)
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name.replace('"', "")),
            )
            .body(bytes);
        let uploaded: MediaResponse = send(self.authorized(request)).await?;

        Ok(MediaDescriptor {
            id: uploaded.id,
            url: uploaded.source_url,
            mime_type: uploaded
                .mime_type
                .unwrap_or_else(|| mime_type.to_string()),
            filename: name,
        })
    }
}
