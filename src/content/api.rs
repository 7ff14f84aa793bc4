//! Client for the blog backend.
//!
//! ```text
//! POST /post/create                      → { _id, slug, ... }
//! PUT  /post/updatepost/:postId/:userId  → { _id, slug, ... }
//! GET  /post/getposts?postId=<id>        → { posts: [ ... ] }
//! ```
//!
//! Non-2xx responses carry `{ "message": "..." }`.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::types::{ApiMessage, Post, PostList, PostPayload, PublishedPost};

pub const DEFAULT_CONTENT_BASE_URL: &str = "http://localhost:3000/api";

/// Errors from the content API.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentError {
    /// Transport failure (connection refused, timeout).
    Network(String),
    /// Non-success response, with the server's message when it sent one.
    Api { status: u16, message: String },
    /// Response body did not have the expected shape.
    Parse(String),
}

impl ContentError {
    /// The text shown to the user. API errors pass the server message
    /// through; anything else collapses into a generic line.
    pub fn user_message(&self) -> String {
        match self {
            ContentError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => "Something went wrong".to_string(),
        }
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Network(msg) => write!(f, "network error: {msg}"),
            ContentError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ContentError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ContentError {}

#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn create_post(&self, payload: &PostPayload) -> Result<PublishedPost, ContentError>;

    async fn update_post(
        &self,
        post_id: &str,
        user_id: &str,
        payload: &PostPayload,
    ) -> Result<PublishedPost, ContentError>;

    /// Loads one post by id.
    async fn get_post(&self, post_id: &str) -> Result<Post, ContentError>;
}

pub struct HttpContentApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpContentApi {
    /// `token` is sent as a bearer credential when present.
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// `base_url` with percent-encoded path segments appended.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ContentError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ContentError::Network(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ContentError::Network(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and decodes a JSON body, mapping failures to `ContentError`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ContentError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Content API response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or(body);
            warn!("Content API error: {} - {}", status, message);
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ContentError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn create_post(&self, payload: &PostPayload) -> Result<PublishedPost, ContentError> {
        info!("Creating post '{}'", payload.title);
        let request = self
            .client
            .post(format!("{}/post/create", self.base_url))
            .json(payload);
        self.send(request).await
    }

    async fn update_post(
        &self,
        post_id: &str,
        user_id: &str,
        payload: &PostPayload,
    ) -> Result<PublishedPost, ContentError> {
        info!("Updating post {} as user {}", post_id, user_id);
        let url = self.endpoint(&["post", "updatepost", post_id, user_id])?;
        let request = self.client.put(url).json(payload);
        self.send(request).await
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, ContentError> {
        debug!("Loading post {}", post_id);
        let request = self
            .client
            .get(format!("{}/post/getposts", self.base_url))
            .query(&[("postId", post_id)]);
        let list: PostList = self.send(request).await?;
        list.posts.into_iter().next().ok_or(ContentError::Api {
            status: 404,
            message: "Post not found".to_string(),
        })
    }
}
