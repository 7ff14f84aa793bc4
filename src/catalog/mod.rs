//! # Catalog
//!
//! Movie/TV metadata: domain types, the `MetadataProvider` trait, the TMDB
//! implementation, and `ListSource` (what a browse row shows).

pub mod provider;
pub mod source;
pub mod tmdb;
pub mod types;

pub use provider::{CatalogError, MetadataProvider};
pub use source::ListSource;
pub use tmdb::TmdbProvider;
pub use types::{
    Genre, MediaDetails, MediaItem, MediaPage, MediaType, RegionCategory, genre_by_name,
    genres_for, poster_url,
};
