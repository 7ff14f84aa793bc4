use std::fmt;

use async_trait::async_trait;

use super::types::{MediaDetails, MediaPage, MediaType, RegionCategory};

/// Errors that can occur while talking to the metadata provider.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Config(msg) => write!(f, "config error: {msg}"),
            CatalogError::Network(msg) => write!(f, "network error: {msg}"),
            CatalogError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            CatalogError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only access to a movie/TV metadata source.
///
/// Listing endpoints return one page at a time; an empty `results` array
/// signals the end of the data.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Titles of one genre, one page at a time.
    async fn by_genre(
        &self,
        media: MediaType,
        genre_id: u32,
        page: u32,
    ) -> Result<MediaPage, CatalogError>;

    /// Today's trending titles. Not paginated.
    async fn trending(&self, media: MediaType) -> Result<MediaPage, CatalogError>;

    /// The full record for one title.
    async fn details(&self, media: MediaType, id: u64) -> Result<MediaDetails, CatalogError>;

    /// Movies of a regional category (e.g. Hindi-language releases in India).
    async fn by_region(
        &self,
        category: &RegionCategory,
        page: u32,
    ) -> Result<MediaPage, CatalogError>;
}
