//! TMDB (The Movie Database) v3 provider.
//!
//! Every request carries `api_key` and `language` query parameters. Listing
//! endpoints are mapped as:
//!
//! | operation   | endpoint                                                    |
//! |-------------|-------------------------------------------------------------|
//! | `by_genre`  | `GET /discover/{movie,tv}?with_genres=<id>&page=<n>`        |
//! | `trending`  | `GET /trending/{movie,tv}/day`                              |
//! | `details`   | `GET /{movie,tv}/<id>`                                      |
//! | `by_region` | `GET /discover/movie?with_original_language=&region=&page=` |

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::catalog::{
    CatalogError, MediaDetails, MediaPage, MediaType, MetadataProvider, RegionCategory,
};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

pub struct TmdbProvider {
    api_key: String,
    base_url: String,
    language: String,
    client: reqwest::Client,
}

impl TmdbProvider {
    /// Creates a new TMDB provider.
    ///
    /// # Arguments
    /// * `api_key` - TMDB v3 API key
    /// * `base_url` - Optional custom base URL (defaults to TMDB's API)
    /// * `language` - Response language, e.g. `en-US`
    pub fn new(api_key: String, base_url: Option<String>, language: String) -> Self {
        Self {
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            language,
            client: reqwest::Client::new(),
        }
    }

    /// Sends a GET request and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        if self.api_key.is_empty() {
            return Err(CatalogError::Config("TMDB API key is not set".to_string()));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("TMDB request: {} {:?}", url, params);

        let mut query: Vec<(&str, &str)> = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("TMDB API error: {} - {}", status, err_body);
            return Err(CatalogError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn by_genre(
        &self,
        media: MediaType,
        genre_id: u32,
        page: u32,
    ) -> Result<MediaPage, CatalogError> {
        let path = format!("/discover/{}", media.path());
        let page: MediaPage = self
            .get_json(
                &path,
                &[
                    ("with_genres", genre_id.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        info!(
            "TMDB genre {} ({:?}) page {}: {} results",
            genre_id,
            media,
            page.page,
            page.results.len()
        );
        Ok(page)
    }

    async fn trending(&self, media: MediaType) -> Result<MediaPage, CatalogError> {
        let path = format!("/trending/{}/day", media.path());
        let page: MediaPage = self.get_json(&path, &[]).await?;
        info!("TMDB trending {:?}: {} results", media, page.results.len());
        Ok(page)
    }

    async fn details(&self, media: MediaType, id: u64) -> Result<MediaDetails, CatalogError> {
        let path = format!("/{}/{}", media.path(), id);
        self.get_json(&path, &[]).await
    }

    async fn by_region(
        &self,
        category: &RegionCategory,
        page: u32,
    ) -> Result<MediaPage, CatalogError> {
        let page: MediaPage = self
            .get_json(
                "/discover/movie",
                &[
                    ("with_original_language", category.original_language.clone()),
                    ("region", category.region.clone()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        info!(
            "TMDB region {} page {}: {} results",
            category.label,
            page.page,
            page.results.len()
        );
        Ok(page)
    }
}
