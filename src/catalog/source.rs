//! Data sources for paginated rows.
//!
//! A `ListSource` is the category key of a row: it names what to fetch and
//! knows how to fetch one page of it. Changing a row's source remounts its
//! list.

use super::{CatalogError, Genre, MediaPage, MediaType, MetadataProvider, RegionCategory};

#[derive(Debug, Clone, PartialEq)]
pub enum ListSource {
    /// Titles of one genre (movie or TV).
    Genre { media: MediaType, genre: Genre },
    /// Today's trending titles. Single page.
    Trending(MediaType),
    /// Regional movie category.
    Region(RegionCategory),
}

impl ListSource {
    /// Fetch one page of this source.
    pub async fn fetch(
        &self,
        provider: &dyn MetadataProvider,
        page: u32,
    ) -> Result<MediaPage, CatalogError> {
        match self {
            ListSource::Genre { media, genre } => provider.by_genre(*media, genre.id, page).await,
            ListSource::Trending(media) => provider.trending(*media).await,
            ListSource::Region(category) => provider.by_region(category, page).await,
        }
    }

    /// Whether reaching the end of the row should request another page.
    pub fn paginates(&self) -> bool {
        !matches!(self, ListSource::Trending(_))
    }

    /// The media type of every item in this source.
    pub fn media_type(&self) -> MediaType {
        match self {
            ListSource::Genre { media, .. } => *media,
            ListSource::Trending(media) => *media,
            ListSource::Region(_) => MediaType::Movie,
        }
    }

    /// Only genre rows can be switched to another genre.
    pub fn is_genre(&self) -> bool {
        matches!(self, ListSource::Genre { .. })
    }

    pub fn title(&self) -> String {
        match self {
            ListSource::Genre {
                media: MediaType::Movie,
                genre,
            } => format!("{} Movies", genre.name),
            ListSource::Genre {
                media: MediaType::Tv,
                genre,
            } => format!("{} TV Shows", genre.name),
            ListSource::Trending(MediaType::Movie) => "Trending Movies".to_string(),
            ListSource::Trending(MediaType::Tv) => "Trending TV Series".to_string(),
            ListSource::Region(category) => format!("{} Movies", category.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::genre_by_name;
    use crate::test_support::StubCatalog;

    fn horror() -> ListSource {
        ListSource::Genre {
            media: MediaType::Movie,
            genre: genre_by_name(MediaType::Movie, "Horror").unwrap(),
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(horror().title(), "Horror Movies");
        assert_eq!(
            ListSource::Trending(MediaType::Tv).title(),
            "Trending TV Series"
        );
        assert_eq!(
            ListSource::Region(RegionCategory::bollywood()).title(),
            "Bollywood Movies"
        );
    }

    #[test]
    fn test_trending_does_not_paginate() {
        assert!(!ListSource::Trending(MediaType::Movie).paginates());
        assert!(horror().paginates());
        assert!(ListSource::Region(RegionCategory::bollywood()).paginates());
    }

    #[tokio::test]
    async fn test_fetch_routes_to_provider_operation() {
        let catalog = StubCatalog::with_pages(3, 2);
        let page = horror().fetch(&catalog, 2).await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.results.len(), 2);

        let calls = catalog.calls();
        assert_eq!(calls, vec!["genre:movie:27:2".to_string()]);

        ListSource::Region(RegionCategory::bollywood())
            .fetch(&catalog, 1)
            .await
            .unwrap();
        ListSource::Trending(MediaType::Tv)
            .fetch(&catalog, 5)
            .await
            .unwrap();
        let calls = catalog.calls();
        assert_eq!(calls[1], "region:hi:IN:1");
        assert_eq!(calls[2], "trending:tv");
    }
}
