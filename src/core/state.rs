//! # Application State
//!
//! Core business state for reelpress. This module contains domain logic
//! only, no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Arc<dyn MetadataProvider>   // TMDB
//! ├── content: Arc<dyn ContentApi>         // blog backend
//! ├── storage: Arc<dyn ObjectStorage>      // image uploads
//! ├── session: Arc<Session>                // read-only current user
//! ├── route: Route                         // which screen is showing
//! ├── rows: Vec<MediaRow>                  // browse sliders
//! ├── focused_row: usize
//! ├── navigator: ScrollNavigator           // page jumps
//! ├── detail: DetailFetcher                // details screen record
//! ├── editor: Option<PostEditor>           // open post form
//! ├── editor_generation: u64               // tags editor tasks
//! └── status_message: String               // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use log::warn;

use crate::catalog::{
    ListSource, MediaDetails, MediaItem, MediaType, MetadataProvider, RegionCategory,
    genre_by_name,
};
use crate::content::{ContentApi, ObjectStorage};
use crate::core::config::ResolvedConfig;
use crate::core::detail::DetailFetcher;
use crate::core::editor::PostEditor;
use crate::core::navigator::{ScrollNavigator, Viewport};
use crate::core::pagination::PaginatedList;
use crate::core::session::Session;

/// Horizontal scroll units per terminal cell.
pub const UNITS_PER_CELL: u32 = 8;
/// Width of one card, in cells.
pub const CARD_CELLS: u16 = 22;
pub const CARD_UNITS: u32 = CARD_CELLS as u32 * UNITS_PER_CELL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Browse,
    Details { media: MediaType, id: u64 },
    Editor,
    /// A post was saved; shows where it lives.
    Published { location: String },
}

/// One horizontal slider on the browse screen.
pub struct MediaRow {
    pub list: PaginatedList<ListSource, MediaItem>,
    /// TMDB id of the highlighted card.
    pub selected: Option<u64>,
    pub viewport: Viewport,
}

impl MediaRow {
    pub fn new(source: ListSource) -> Self {
        Self {
            list: PaginatedList::new(source),
            selected: None,
            viewport: Viewport::default(),
        }
    }

    pub fn source(&self) -> &ListSource {
        self.list.source()
    }

    /// Items with a poster, the only ones shown as cards.
    pub fn cards(&self) -> impl Iterator<Item = &MediaItem> {
        self.list.renderable(MediaItem::is_renderable)
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    pub fn card_at(&self, index: usize) -> Option<&MediaItem> {
        self.cards().nth(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.cards().position(|item| item.id == id)
    }

    pub fn selected_item(&self) -> Option<&MediaItem> {
        let id = self.selected?;
        self.cards().find(|item| item.id == id)
    }

    /// Discard everything and show `source` from page 1.
    pub fn remount(&mut self, source: ListSource) {
        self.list.mount(source);
        self.selected = None;
        self.viewport.resize(self.viewport.client_width, 0);
    }

    pub fn set_client_width(&mut self, client_width: u32) {
        self.viewport
            .resize(client_width, self.card_count() as u32 * CARD_UNITS);
    }

    /// Recompute the content width after cards were added.
    pub fn refresh_extent(&mut self) {
        self.set_client_width(self.viewport.client_width);
    }

    /// Scroll just enough to show the card at `index`.
    pub fn reveal(&mut self, index: usize) {
        let start = index as u32 * CARD_UNITS;
        let end = start + CARD_UNITS;
        let vp = &mut self.viewport;
        if start < vp.scroll_left {
            vp.scroll_to(start);
        } else if end > vp.scroll_left + vp.client_width {
            vp.scroll_to(end.saturating_sub(vp.client_width));
        }
    }

    /// Index of the first card fully inside the window.
    pub fn first_visible(&self) -> usize {
        self.viewport.scroll_left.div_ceil(CARD_UNITS) as usize
    }
}

pub struct App {
    pub catalog: Arc<dyn MetadataProvider>,
    pub content: Arc<dyn ContentApi>,
    pub storage: Arc<dyn ObjectStorage>,
    pub session: Arc<Session>,
    pub route: Route,
    pub rows: Vec<MediaRow>,
    pub focused_row: usize,
    pub navigator: ScrollNavigator,
    pub detail: DetailFetcher<(MediaType, u64), MediaDetails>,
    pub editor: Option<PostEditor>,
    /// Bumped whenever an editor opens or closes; results for an older
    /// value are dropped.
    pub editor_generation: u64,
    pub status_message: String,
    pub image_base_url: String,
}

impl App {
    pub fn new(
        catalog: Arc<dyn MetadataProvider>,
        content: Arc<dyn ContentApi>,
        storage: Arc<dyn ObjectStorage>,
        session: Arc<Session>,
        sources: Vec<ListSource>,
    ) -> Self {
        Self {
            catalog,
            content,
            storage,
            session,
            route: Route::Browse,
            rows: sources.into_iter().map(MediaRow::new).collect(),
            focused_row: 0,
            navigator: ScrollNavigator::default(),
            detail: DetailFetcher::new(),
            editor: None,
            editor_generation: 0,
            status_message: String::from("Welcome to reelpress!"),
            image_base_url: crate::core::config::DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }

    pub fn from_config(
        catalog: Arc<dyn MetadataProvider>,
        content: Arc<dyn ContentApi>,
        storage: Arc<dyn ObjectStorage>,
        config: &ResolvedConfig,
    ) -> Self {
        let session = Arc::new(Session::from_config(config));
        let mut app = Self::new(catalog, content, storage, session, browse_sources(config));
        app.navigator = ScrollNavigator::new(config.scroll_margin);
        app.image_base_url = config.tmdb_image_base_url.clone();
        app
    }

    pub fn focused(&self) -> Option<&MediaRow> {
        self.rows.get(self.focused_row)
    }

    /// The open editor, if `generation` still names it.
    pub fn editor_for(&mut self, generation: u64) -> Option<&mut PostEditor> {
        if generation != self.editor_generation {
            return None;
        }
        self.editor.as_mut()
    }
}

/// Rows of the browse screen, top to bottom: trending movies, trending
/// series, movie genres, the regional row, TV genres.
pub fn browse_sources(config: &ResolvedConfig) -> Vec<ListSource> {
    let mut sources = vec![
        ListSource::Trending(MediaType::Movie),
        ListSource::Trending(MediaType::Tv),
    ];
    sources.extend(genre_sources(MediaType::Movie, &config.movie_genres));

    let mut region = RegionCategory::bollywood();
    region.region = config.tmdb_region.clone();
    sources.push(ListSource::Region(region));

    sources.extend(genre_sources(MediaType::Tv, &config.tv_genres));
    sources
}

fn genre_sources(media: MediaType, names: &[String]) -> Vec<ListSource> {
    names
        .iter()
        .filter_map(|name| match genre_by_name(media, name) {
            Some(genre) => Some(ListSource::Genre { media, genre }),
            None => {
                warn!("Unknown {} genre in config: {}", media.label(), name);
                None
            }
        })
        .collect()
}
