use serde::{Deserialize, Serialize};

use crate::core::pagination::Keyed;

/// Which half of the catalog a request targets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Tv,
}

impl MediaType {
    /// Path segment used by the TMDB v3 API.
    pub fn path(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaType::Movie => "Movies",
            MediaType::Tv => "TV Series",
        }
    }
}

/// A single entry in a paginated listing.
///
/// Movies carry `title`/`release_date`, TV shows carry `name`/`first_air_date`.
/// Everything except `id` is optional because TMDB omits fields freely.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Present on trending results, which mix media types.
    #[serde(default)]
    pub media_type: Option<MediaType>,
}

impl MediaItem {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    /// Four-digit year from whichever date field is present.
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .and_then(|d| d.get(..4))
    }

    /// Items without a poster are kept in the list but never drawn as cards.
    pub fn is_renderable(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|p| !p.is_empty())
    }
}

impl Keyed for MediaItem {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}

/// One page of a listing endpoint. An empty `results` means no more data.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct MediaPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MediaItem>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Full record for the details page.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MediaDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
}

impl MediaDetails {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .filter(|d| !d.is_empty())
    }
}

/// A regional slice of the movie catalog, selected by original language
/// and release region rather than by genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCategory {
    pub label: String,
    pub original_language: String,
    pub region: String,
}

impl RegionCategory {
    pub fn bollywood() -> Self {
        Self {
            label: "Bollywood".to_string(),
            original_language: "hi".to_string(),
            region: "IN".to_string(),
        }
    }
}

/// TMDB's fixed movie genre table.
pub const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// TMDB's fixed TV genre table.
pub const TV_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

pub fn genres_for(media: MediaType) -> Vec<Genre> {
    let table = match media {
        MediaType::Movie => MOVIE_GENRES,
        MediaType::Tv => TV_GENRES,
    };
    table
        .iter()
        .map(|(id, name)| Genre {
            id: *id,
            name: name.to_string(),
        })
        .collect()
}

/// Case-insensitive genre lookup by name.
pub fn genre_by_name(media: MediaType, name: &str) -> Option<Genre> {
    genres_for(media)
        .into_iter()
        .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
}

/// Builds a full image URL, e.g. `https://image.tmdb.org/t/p/w500/abc.jpg`.
pub fn poster_url(image_base: &str, size: &str, path: &str) -> String {
    format!("{}/{}{}", image_base.trim_end_matches('/'), size, path)
}
