//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::catalog::{
    CatalogError, ListSource, MediaDetails, MediaItem, MediaPage, MediaType, MetadataProvider,
    RegionCategory, genre_by_name,
};
use crate::content::{
    ContentApi, ContentError, ObjectStorage, Post, PostPayload, PublishedPost, StorageError,
    UploadProgress,
};
use crate::core::session::{CurrentUser, Session};
use crate::core::state::App;

/// A renderable item with a poster.
pub fn item(id: u64) -> MediaItem {
    MediaItem {
        id,
        title: Some(format!("Title {id}")),
        name: None,
        overview: None,
        poster_path: Some(format!("/poster{id}.jpg")),
        backdrop_path: None,
        vote_average: Some(7.5),
        release_date: Some("2020-01-01".to_string()),
        first_air_date: None,
        media_type: None,
    }
}

pub fn items(ids: RangeInclusive<u64>) -> Vec<MediaItem> {
    ids.map(item).collect()
}

/// In-memory catalog: `total_pages` pages of `per_page` items each, then
/// empty pages. Records every call as a short string.
pub struct StubCatalog {
    total_pages: u32,
    per_page: u64,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl StubCatalog {
    pub fn with_pages(total_pages: u32, per_page: u64) -> Self {
        Self {
            total_pages,
            per_page,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every request fails with a network error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_pages(0, 0)
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) -> Result<(), CatalogError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.fail {
            return Err(CatalogError::Network("stub offline".to_string()));
        }
        Ok(())
    }

    fn page(&self, page: u32) -> MediaPage {
        let results = if page >= 1 && page <= self.total_pages {
            let start = u64::from(page - 1) * self.per_page + 1;
            (start..start + self.per_page).map(item).collect()
        } else {
            Vec::new()
        };
        MediaPage {
            page,
            results,
            total_pages: Some(self.total_pages),
        }
    }
}

#[async_trait]
impl MetadataProvider for StubCatalog {
    fn name(&self) -> &str {
        "stub"
    }

    async fn by_genre(
        &self,
        media: MediaType,
        genre_id: u32,
        page: u32,
    ) -> Result<MediaPage, CatalogError> {
        self.record(format!("genre:{}:{}:{}", media.path(), genre_id, page))?;
        Ok(self.page(page))
    }

    async fn trending(&self, media: MediaType) -> Result<MediaPage, CatalogError> {
        self.record(format!("trending:{}", media.path()))?;
        Ok(self.page(1))
    }

    async fn details(&self, media: MediaType, id: u64) -> Result<MediaDetails, CatalogError> {
        self.record(format!("details:{}:{}", media.path(), id))?;
        Ok(MediaDetails {
            id,
            title: Some(format!("Title {id}")),
            name: None,
            tagline: Some("A tagline".to_string()),
            overview: Some("An overview".to_string()),
            vote_average: Some(7.5),
            vote_count: Some(100),
            genres: Vec::new(),
            runtime: Some(120),
            release_date: Some("2020-01-01".to_string()),
            first_air_date: None,
            poster_path: Some(format!("/poster{id}.jpg")),
            homepage: None,
        })
    }

    async fn by_region(
        &self,
        category: &RegionCategory,
        page: u32,
    ) -> Result<MediaPage, CatalogError> {
        self.record(format!(
            "region:{}:{}:{}",
            category.original_language, category.region, page
        ))?;
        Ok(self.page(page))
    }
}

/// Content API that accepts everything and echoes a slug from the title.
pub struct StubContent;

fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[async_trait]
impl ContentApi for StubContent {
    async fn create_post(&self, payload: &PostPayload) -> Result<PublishedPost, ContentError> {
        Ok(PublishedPost {
            id: Some("new-id".to_string()),
            slug: slugify(&payload.title),
        })
    }

    async fn update_post(
        &self,
        post_id: &str,
        _user_id: &str,
        payload: &PostPayload,
    ) -> Result<PublishedPost, ContentError> {
        Ok(PublishedPost {
            id: Some(post_id.to_string()),
            slug: slugify(&payload.title),
        })
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, ContentError> {
        Err(ContentError::Api {
            status: 404,
            message: format!("Post {post_id} not found"),
        })
    }
}

/// Storage that reports one progress step and returns a fixed URL.
pub struct StubStorage;

#[async_trait]
impl ObjectStorage for StubStorage {
    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        progress: Sender<UploadProgress>,
    ) -> Result<String, StorageError> {
        let total = bytes.len() as u64;
        let _ = progress
            .send(UploadProgress {
                bytes_transferred: total,
                total_bytes: total,
            })
            .await;
        Ok(format!("https://storage.test/{file_name}"))
    }
}

/// Rows used by `test_app()`: two trending rows, one movie genre row
/// (index 2) and the regional row.
pub fn test_sources() -> Vec<ListSource> {
    vec![
        ListSource::Trending(MediaType::Movie),
        ListSource::Trending(MediaType::Tv),
        ListSource::Genre {
            media: MediaType::Movie,
            genre: genre_by_name(MediaType::Movie, "Horror").unwrap(),
        },
        ListSource::Region(RegionCategory::bollywood()),
    ]
}

fn app_with_session(session: Session) -> App {
    App::new(
        Arc::new(StubCatalog::with_pages(3, 5)),
        Arc::new(StubContent),
        Arc::new(StubStorage),
        Arc::new(session),
        test_sources(),
    )
}

/// Creates a test App with stub collaborators and no signed-in user.
pub fn test_app() -> App {
    app_with_session(Session::anonymous())
}

/// Same as `test_app()`, signed in as `u1`.
pub fn test_app_signed_in() -> App {
    app_with_session(Session::new(
        Some(CurrentUser {
            id: "u1".to_string(),
            username: Some("ana".to_string()),
        }),
        Some("token".to_string()),
    ))
}
