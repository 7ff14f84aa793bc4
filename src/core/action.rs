//! # Actions
//!
//! Everything that can happen in reelpress becomes an `Action`.
//! User presses `]`? That's `Action::ScrollRow(ScrollDirection::Forward)`.
//! TMDB responds? That's `Action::PageLoaded { row, ticket, items }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O to start. No side
//! effects here. I/O happens in the adapter.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Results of background work carry the ticket or editor generation they
//! were started with, so anything that arrives after its view moved on is
//! dropped here.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::catalog::{CatalogError, Genre, ListSource, MediaDetails, MediaItem, MediaType};
use crate::content::{Category, Post, PublishedPost, UploadProgress};
use crate::core::detail::DetailTicket;
use crate::core::editor::{EditorMode, PostEditor, SubmitRequest};
use crate::core::navigator::ScrollDirection;
use crate::core::pagination::{PageOutcome, PageTicket};
use crate::core::state::{App, Route, UNITS_PER_CELL};

#[derive(Debug)]
pub enum Action {
    Quit,
    /// Width of the row area, in terminal cells.
    Resize { width: u16 },
    /// Request page 1 of every row that has nothing yet.
    MountBrowse,

    // -- browse navigation
    PrevRow,
    NextRow,
    MoveCard(ScrollDirection),
    ScrollRow(ScrollDirection),
    /// Switch a genre row to another genre.
    ChangeGenre { row: usize, genre: Genre },
    PageLoaded {
        row: usize,
        ticket: PageTicket<ListSource>,
        items: Vec<MediaItem>,
    },
    PageFailed {
        row: usize,
        ticket: PageTicket<ListSource>,
        error: String,
    },

    // -- details
    OpenDetails,
    DetailResolved {
        ticket: DetailTicket<(MediaType, u64)>,
        result: Result<MediaDetails, CatalogError>,
    },
    Back,

    // -- post editor
    OpenEditor(EditorMode),
    PostLoaded { editor: u64, post: Post },
    PostLoadFailed { editor: u64, error: String },
    EditTitle(String),
    EditCategory(Category),
    EditContent(String),
    SelectFile(Option<PathBuf>),
    StartUpload,
    UploadProgress { editor: u64, progress: UploadProgress },
    UploadFinished { editor: u64, url: String },
    UploadFailed { editor: u64, error: String },
    EmbedVideo(String),
    AddFileLink(String),
    SubmitPost,
    PostPublished { editor: u64, post: PublishedPost },
    PublishFailed { editor: u64, error: String },
    CloseEditor,
}

/// Background work owned by one slot; starting new work in a slot replaces
/// whatever ran there before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskScope {
    Row(usize),
    Detail,
    PostLoad,
    Upload,
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchPages(Vec<(usize, PageTicket<ListSource>)>),
    FetchDetail(DetailTicket<(MediaType, u64)>),
    LoadPost { editor: u64, post_id: String },
    Upload { editor: u64, path: PathBuf },
    Submit { editor: u64, request: SubmitRequest },
    Cancel(Vec<TaskScope>),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::Resize { width } => {
            let client_width = u32::from(width) * UNITS_PER_CELL;
            for row in &mut app.rows {
                row.set_client_width(client_width);
            }
            Effect::None
        }

        Action::MountBrowse => {
            let tickets: Vec<_> = app
                .rows
                .iter_mut()
                .enumerate()
                .filter(|(_, row)| row.list.is_empty())
                .filter_map(|(i, row)| row.list.begin_next().map(|t| (i, t)))
                .collect();
            fetch_pages(tickets)
        }

        Action::PrevRow => {
            app.focused_row = app.focused_row.saturating_sub(1);
            Effect::None
        }

        Action::NextRow => {
            if app.focused_row + 1 < app.rows.len() {
                app.focused_row += 1;
            }
            Effect::None
        }

        Action::MoveCard(direction) => {
            let row_index = app.focused_row;
            let Some(row) = app.rows.get_mut(row_index) else {
                return Effect::None;
            };
            let count = row.card_count();
            if count == 0 {
                return Effect::None;
            }
            let current = row.selected_index();
            let next = match (direction, current) {
                (_, None) => 0,
                (ScrollDirection::Back, Some(i)) => i.saturating_sub(1),
                (ScrollDirection::Forward, Some(i)) => (i + 1).min(count - 1),
            };
            row.selected = row.card_at(next).map(|item| item.id);
            row.reveal(next);
            load_if_near_end(app, row_index)
        }

        Action::ScrollRow(direction) => {
            let row_index = app.focused_row;
            let navigator = app.navigator;
            let Some(row) = app.rows.get_mut(row_index) else {
                return Effect::None;
            };
            navigator.navigate(Some(&mut row.viewport), direction);
            let first = row.first_visible();
            if let Some(item) = row.card_at(first) {
                row.selected = Some(item.id);
            }
            load_if_near_end(app, row_index)
        }

        Action::ChangeGenre { row, genre } => {
            let Some(r) = app.rows.get_mut(row) else {
                return Effect::None;
            };
            if !r.source().is_genre() {
                return Effect::None;
            }
            let media = r.source().media_type();
            let source = ListSource::Genre { media, genre };
            info!("Row {} now shows {}", row, source.title());
            r.remount(source);
            match r.list.begin_next() {
                Some(ticket) => Effect::FetchPages(vec![(row, ticket)]),
                None => Effect::None,
            }
        }

        Action::PageLoaded { row, ticket, items } => {
            let Some(r) = app.rows.get_mut(row) else {
                return Effect::None;
            };
            match r.list.complete(&ticket, items) {
                PageOutcome::Appended(n) => {
                    debug!(
                        "{} page {}: {} items ({} total)",
                        ticket.source.title(),
                        ticket.page,
                        n,
                        r.list.len()
                    );
                    r.refresh_extent();
                    if r.selected.is_none() {
                        let first = r.cards().next().map(|item| item.id);
                        r.selected = first;
                    }
                }
                PageOutcome::Exhausted => {
                    info!("{} has no more pages", ticket.source.title());
                }
                PageOutcome::Stale => {
                    debug!(
                        "Dropping stale page {} of {}",
                        ticket.page,
                        ticket.source.title()
                    );
                }
            }
            Effect::None
        }

        Action::PageFailed { row, ticket, error } => {
            let Some(r) = app.rows.get_mut(row) else {
                return Effect::None;
            };
            if r.list.fail(&ticket) {
                warn!(
                    "Failed to load {} page {}: {}",
                    ticket.source.title(),
                    ticket.page,
                    error
                );
                app.status_message = format!("Failed to load {}: {}", ticket.source.title(), error);
            }
            Effect::None
        }

        Action::OpenDetails => {
            let Some(row) = app.focused() else {
                return Effect::None;
            };
            let Some(item) = row.selected_item() else {
                return Effect::None;
            };
            let media = row.source().media_type();
            let id = item.id;
            app.route = Route::Details { media, id };
            match app.detail.mount((media, id)) {
                Some(ticket) => Effect::FetchDetail(ticket),
                None => Effect::None,
            }
        }

        Action::DetailResolved { ticket, result } => {
            if !app.detail.resolve(&ticket, result) {
                debug!("Dropping stale details for {:?}", ticket.id);
            }
            Effect::None
        }

        Action::Back => match app.route {
            Route::Browse => Effect::None,
            Route::Details { .. } => {
                app.detail.unmount();
                app.route = Route::Browse;
                Effect::Cancel(vec![TaskScope::Detail])
            }
            Route::Editor | Route::Published { .. } => close_editor(app),
        },

        Action::OpenEditor(mode) => {
            app.editor_generation += 1;
            let generation = app.editor_generation;
            app.editor = Some(PostEditor::new(mode.clone()));
            app.route = Route::Editor;
            match mode {
                EditorMode::Create => {
                    app.status_message = "New post".to_string();
                    Effect::None
                }
                EditorMode::Update { post_id } => {
                    app.status_message = format!("Loading post {}...", post_id);
                    Effect::LoadPost {
                        editor: generation,
                        post_id,
                    }
                }
            }
        }

        Action::PostLoaded { editor, post } => {
            let title = post.title.clone();
            if let Some(form) = app.editor_for(editor) {
                form.load_existing(post);
                app.status_message = format!("Editing \"{}\"", title);
            }
            Effect::None
        }

        Action::PostLoadFailed { editor, error } => {
            if let Some(form) = app.editor_for(editor) {
                form.fail_load(error.clone());
                app.status_message = error;
            }
            Effect::None
        }

        Action::EditTitle(title) => {
            if let Some(form) = app.editor.as_mut() {
                form.set_title(title);
            }
            Effect::None
        }

        Action::EditCategory(category) => {
            if let Some(form) = app.editor.as_mut() {
                form.set_category(category);
            }
            Effect::None
        }

        Action::EditContent(content) => {
            if let Some(form) = app.editor.as_mut() {
                form.set_content(content);
            }
            Effect::None
        }

        Action::SelectFile(path) => {
            if let Some(form) = app.editor.as_mut() {
                form.select_file(path);
            }
            Effect::None
        }

        Action::StartUpload => {
            let generation = app.editor_generation;
            let Some(form) = app.editor.as_mut() else {
                return Effect::None;
            };
            match form.begin_upload() {
                Ok(path) => {
                    app.status_message = format!("Uploading {}...", path.display());
                    Effect::Upload {
                        editor: generation,
                        path,
                    }
                }
                Err(e) => {
                    app.status_message = e.to_string();
                    Effect::None
                }
            }
        }

        Action::UploadProgress { editor, progress } => {
            if let Some(form) = app.editor_for(editor) {
                form.upload_progress(progress);
            }
            Effect::None
        }

        Action::UploadFinished { editor, url } => {
            if let Some(form) = app.editor_for(editor)
                && form.finish_upload(url)
            {
                app.status_message = "Image uploaded".to_string();
            }
            Effect::None
        }

        Action::UploadFailed { editor, error } => {
            if let Some(form) = app.editor_for(editor)
                && form.fail_upload(&error)
            {
                app.status_message = crate::core::editor::UPLOAD_FAILED_MESSAGE.to_string();
            }
            Effect::None
        }

        Action::EmbedVideo(link) => {
            if let Some(form) = app.editor.as_mut() {
                form.embed_video(&link);
            }
            Effect::None
        }

        Action::AddFileLink(link) => {
            if let Some(form) = app.editor.as_mut() {
                form.add_file_link(&link);
            }
            Effect::None
        }

        Action::SubmitPost => {
            let generation = app.editor_generation;
            let session = app.session.clone();
            let Some(form) = app.editor.as_mut() else {
                return Effect::None;
            };
            match form.submit(&session) {
                Ok(request) => {
                    app.status_message = "Publishing...".to_string();
                    Effect::Submit {
                        editor: generation,
                        request,
                    }
                }
                Err(e) => {
                    debug!("Submit refused: {}", e);
                    app.status_message = e.to_string();
                    Effect::None
                }
            }
        }

        Action::PostPublished { editor, post } => {
            if let Some(form) = app.editor_for(editor) {
                let location = form.publish_succeeded(post);
                info!("Post published at {}", location);
                app.status_message = format!("Published {}", location);
                app.route = Route::Published { location };
            }
            Effect::None
        }

        Action::PublishFailed { editor, error } => {
            if let Some(form) = app.editor_for(editor) {
                form.publish_failed(error.clone());
                app.status_message = error;
            }
            Effect::None
        }

        Action::CloseEditor => close_editor(app),
    }
}

fn fetch_pages(tickets: Vec<(usize, PageTicket<ListSource>)>) -> Effect {
    if tickets.is_empty() {
        Effect::None
    } else {
        Effect::FetchPages(tickets)
    }
}

/// Claim the next page of a row whose window reached the end of its cards.
fn load_if_near_end(app: &mut App, row_index: usize) -> Effect {
    let Some(row) = app.rows.get_mut(row_index) else {
        return Effect::None;
    };
    if !row.source().paginates() || !row.viewport.at_end() {
        return Effect::None;
    }
    match row.list.begin_next() {
        Some(ticket) => {
            debug!(
                "{} near end, requesting page {}",
                ticket.source.title(),
                ticket.page
            );
            Effect::FetchPages(vec![(row_index, ticket)])
        }
        None => Effect::None,
    }
}

fn close_editor(app: &mut App) -> Effect {
    app.editor = None;
    app.editor_generation += 1;
    app.route = Route::Browse;
    Effect::Cancel(vec![TaskScope::PostLoad, TaskScope::Upload, TaskScope::Submit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::genre_by_name;
    use crate::content::PostPayload;
    use crate::core::state::CARD_UNITS;
    use crate::test_support::{item, items, test_app, test_app_signed_in};

    fn load_first_pages(app: &mut App) {
        let Effect::FetchPages(tickets) = update(app, Action::MountBrowse) else {
            panic!("expected page fetches");
        };
        for (row, ticket) in tickets {
            update(
                app,
                Action::PageLoaded {
                    row,
                    ticket,
                    items: items(1..=5),
                },
            );
        }
    }

    /// Row 2 of `test_app()` is a paginated genre row.
    const GENRE_ROW: usize = 2;

    #[test]
    fn test_mount_browse_requests_page_one_of_every_row() {
        let mut app = test_app();
        let effect = update(&mut app, Action::MountBrowse);
        let Effect::FetchPages(tickets) = effect else {
            panic!("expected FetchPages, got {effect:?}");
        };
        assert_eq!(tickets.len(), app.rows.len());
        assert!(tickets.iter().all(|(_, t)| t.page == 1));

        // A second mount while page 1 is in flight does nothing
        assert_eq!(update(&mut app, Action::MountBrowse), Effect::None);
    }

    #[test]
    fn test_page_loaded_appends_and_selects_first_card() {
        let mut app = test_app();
        load_first_pages(&mut app);
        let row = &app.rows[GENRE_ROW];
        assert_eq!(row.list.len(), 5);
        assert_eq!(row.list.cursor(), 2);
        assert_eq!(row.selected, Some(1));
    }

    #[test]
    fn test_page_failure_surfaces_and_keeps_items() {
        let mut app = test_app();
        load_first_pages(&mut app);
        update(&mut app, Action::Resize { width: 44 });
        app.focused_row = GENRE_ROW;

        // Walk right until the row asks for page 2
        let mut ticket = None;
        for _ in 0..5 {
            if let Effect::FetchPages(mut t) = update(&mut app, Action::MoveCard(ScrollDirection::Forward)) {
                ticket = t.pop();
                break;
            }
        }
        let (row, ticket) = ticket.expect("near-end fetch");
        assert_eq!(ticket.page, 2);

        update(
            &mut app,
            Action::PageFailed {
                row,
                ticket,
                error: "HTTP 500".to_string(),
            },
        );
        assert_eq!(app.rows[GENRE_ROW].list.len(), 5);
        assert_eq!(app.rows[GENRE_ROW].list.cursor(), 2);
        assert!(app.status_message.contains("HTTP 500"));
    }

    #[test]
    fn test_no_fetch_before_end_of_row() {
        let mut app = test_app();
        load_first_pages(&mut app);
        // Window of 2 cards out of 5
        update(&mut app, Action::Resize { width: 44 });
        app.focused_row = GENRE_ROW;
        assert_eq!(
            update(&mut app, Action::MoveCard(ScrollDirection::Forward)),
            Effect::None
        );
        assert_eq!(app.rows[GENRE_ROW].selected, Some(2));
    }

    #[test]
    fn test_trending_row_never_paginates() {
        let mut app = test_app();
        load_first_pages(&mut app);
        update(&mut app, Action::Resize { width: 200 });
        app.focused_row = 0;
        assert!(app.rows[0].viewport.at_end());
        assert_eq!(
            update(&mut app, Action::ScrollRow(ScrollDirection::Forward)),
            Effect::None
        );
    }

    #[test]
    fn test_scroll_row_moves_by_width_minus_margin() {
        let mut app = test_app();
        let Effect::FetchPages(tickets) = update(&mut app, Action::MountBrowse) else {
            panic!("expected page fetches");
        };
        let (row, ticket) = tickets[GENRE_ROW].clone();
        update(
            &mut app,
            Action::PageLoaded {
                row,
                ticket,
                items: items(1..=40),
            },
        );
        update(&mut app, Action::Resize { width: 100 });
        app.focused_row = GENRE_ROW;

        update(&mut app, Action::ScrollRow(ScrollDirection::Forward));
        assert_eq!(app.rows[GENRE_ROW].viewport.scroll_left, 800 - 110);
        update(&mut app, Action::ScrollRow(ScrollDirection::Forward));
        update(&mut app, Action::ScrollRow(ScrollDirection::Back));
        assert_eq!(app.rows[GENRE_ROW].viewport.scroll_left, 800 - 110);
        let first = app.rows[GENRE_ROW].first_visible();
        assert_eq!(first, (690u32.div_ceil(CARD_UNITS)) as usize);
        assert_eq!(app.rows[GENRE_ROW].selected, Some(first as u64 + 1));
    }

    #[test]
    fn test_change_genre_resets_row_and_drops_stale_page() {
        let mut app = test_app();
        let Effect::FetchPages(tickets) = update(&mut app, Action::MountBrowse) else {
            panic!("expected page fetches");
        };
        let (row, old_ticket) = tickets[GENRE_ROW].clone();

        let western = genre_by_name(MediaType::Movie, "Western").unwrap();
        let effect = update(&mut app, Action::ChangeGenre { row, genre: western });
        let Effect::FetchPages(new) = effect else {
            panic!("expected a fetch for the new genre");
        };
        assert_eq!(new[0].1.page, 1);
        assert_eq!(new[0].1.source.title(), "Western Movies");
        assert!(app.rows[row].list.is_empty());

        // The horror page arrives late
        update(
            &mut app,
            Action::PageLoaded {
                row,
                ticket: old_ticket,
                items: items(1..=3),
            },
        );
        assert!(app.rows[row].list.is_empty());
    }

    #[test]
    fn test_change_genre_ignored_for_trending_row() {
        let mut app = test_app();
        let western = genre_by_name(MediaType::Movie, "Western").unwrap();
        assert_eq!(
            update(&mut app, Action::ChangeGenre { row: 0, genre: western }),
            Effect::None
        );
    }

    #[test]
    fn test_open_details_fetches_once() {
        let mut app = test_app();
        load_first_pages(&mut app);
        app.focused_row = GENRE_ROW;

        let Effect::FetchDetail(ticket) = update(&mut app, Action::OpenDetails) else {
            panic!("expected detail fetch");
        };
        assert_eq!(ticket.id, (MediaType::Movie, 1));
        assert_eq!(app.route, Route::Details { media: MediaType::Movie, id: 1 });
        assert_eq!(update(&mut app, Action::OpenDetails), Effect::None);

        assert_eq!(
            update(&mut app, Action::Back),
            Effect::Cancel(vec![TaskScope::Detail])
        );
        assert_eq!(app.route, Route::Browse);
        assert!(app.detail.id().is_none());
    }

    #[test]
    fn test_detail_failure_keeps_placeholder() {
        let mut app = test_app();
        load_first_pages(&mut app);
        let Effect::FetchDetail(ticket) = update(&mut app, Action::OpenDetails) else {
            panic!("expected detail fetch");
        };
        update(
            &mut app,
            Action::DetailResolved {
                ticket,
                result: Err(CatalogError::Network("offline".to_string())),
            },
        );
        assert!(app.detail.get().is_none());
        assert!(!app.detail.is_loading());
    }

    #[test]
    fn test_open_update_editor_loads_post() {
        let mut app = test_app_signed_in();
        let effect = update(
            &mut app,
            Action::OpenEditor(EditorMode::Update {
                post_id: "p1".to_string(),
            }),
        );
        assert_eq!(
            effect,
            Effect::LoadPost {
                editor: app.editor_generation,
                post_id: "p1".to_string()
            }
        );
        assert_eq!(app.route, Route::Editor);
    }

    #[test]
    fn test_update_submit_after_load_sends_loaded_fields() {
        let mut app = test_app_signed_in();
        update(
            &mut app,
            Action::OpenEditor(EditorMode::Update {
                post_id: "p1".to_string(),
            }),
        );
        let editor = app.editor_generation;
        update(
            &mut app,
            Action::PostLoaded {
                editor,
                post: Post {
                    id: "p1".to_string(),
                    user_id: Some("u1".to_string()),
                    title: "A".to_string(),
                    content: "<p>x</p>".to_string(),
                    category: Category::Movies,
                    image: Some("https://img/a.png".to_string()),
                    slug: Some("a".to_string()),
                },
            },
        );

        let effect = update(&mut app, Action::SubmitPost);
        assert_eq!(
            effect,
            Effect::Submit {
                editor,
                request: SubmitRequest::Update {
                    post_id: "p1".to_string(),
                    user_id: "u1".to_string(),
                    payload: PostPayload {
                        title: "A".to_string(),
                        content: "<p>x</p>".to_string(),
                        category: Category::Movies,
                        image: Some("https://img/a.png".to_string()),
                    },
                },
            }
        );
    }

    #[test]
    fn test_upload_in_progress_blocks_submit() {
        let mut app = test_app();
        update(&mut app, Action::OpenEditor(EditorMode::Create));
        update(&mut app, Action::EditTitle("T".to_string()));
        update(&mut app, Action::SelectFile(Some(PathBuf::from("a.png"))));

        let Effect::Upload { editor, path } = update(&mut app, Action::StartUpload) else {
            panic!("expected upload");
        };
        assert_eq!(path, PathBuf::from("a.png"));
        assert_eq!(update(&mut app, Action::StartUpload), Effect::None);
        assert_eq!(update(&mut app, Action::SubmitPost), Effect::None);

        update(
            &mut app,
            Action::UploadFinished {
                editor,
                url: "https://cdn/a.png".to_string(),
            },
        );
        let Effect::Submit { request, .. } = update(&mut app, Action::SubmitPost) else {
            panic!("expected submit after upload finished");
        };
        let SubmitRequest::Create(payload) = request else {
            panic!("expected create");
        };
        assert_eq!(payload.image.as_deref(), Some("https://cdn/a.png"));
    }

    #[test]
    fn test_upload_without_file_shows_message() {
        let mut app = test_app();
        update(&mut app, Action::OpenEditor(EditorMode::Create));
        assert_eq!(update(&mut app, Action::StartUpload), Effect::None);
        assert_eq!(app.status_message, "Please select an image");
    }

    #[test]
    fn test_results_for_closed_editor_are_dropped() {
        let mut app = test_app();
        update(&mut app, Action::OpenEditor(EditorMode::Create));
        update(&mut app, Action::SelectFile(Some(PathBuf::from("a.png"))));
        let Effect::Upload { editor: old, .. } = update(&mut app, Action::StartUpload) else {
            panic!("expected upload");
        };

        let effect = update(&mut app, Action::CloseEditor);
        assert!(matches!(effect, Effect::Cancel(ref scopes) if scopes.contains(&TaskScope::Upload)));
        update(&mut app, Action::OpenEditor(EditorMode::Create));

        update(
            &mut app,
            Action::UploadFinished {
                editor: old,
                url: "https://cdn/late.png".to_string(),
            },
        );
        let form = app.editor.as_ref().unwrap();
        assert!(form.draft().image.is_none());
    }

    #[test]
    fn test_publish_success_navigates_to_post() {
        let mut app = test_app();
        update(&mut app, Action::OpenEditor(EditorMode::Create));
        update(&mut app, Action::EditTitle("Hello".to_string()));
        let Effect::Submit { editor, .. } = update(&mut app, Action::SubmitPost) else {
            panic!("expected submit");
        };
        update(
            &mut app,
            Action::PostPublished {
                editor,
                post: PublishedPost {
                    id: Some("p1".to_string()),
                    slug: "hello".to_string(),
                },
            },
        );
        assert_eq!(
            app.route,
            Route::Published {
                location: "/post/hello".to_string()
            }
        );
    }

    #[test]
    fn test_publish_failure_surfaces_message() {
        let mut app = test_app();
        update(&mut app, Action::OpenEditor(EditorMode::Create));
        update(&mut app, Action::EditTitle("Hello".to_string()));
        update(&mut app, Action::EditContent("<p>draft</p>".to_string()));
        let Effect::Submit { editor, .. } = update(&mut app, Action::SubmitPost) else {
            panic!("expected submit");
        };
        update(
            &mut app,
            Action::PublishFailed {
                editor,
                error: "Title already exists".to_string(),
            },
        );
        assert_eq!(app.status_message, "Title already exists");
        assert_eq!(app.route, Route::Editor);
        let form = app.editor.as_ref().unwrap();
        assert_eq!(form.draft().content, "<p>draft</p>");
    }

    #[test]
    fn test_embed_actions_edit_body() {
        let mut app = test_app();
        update(&mut app, Action::OpenEditor(EditorMode::Create));
        update(
            &mut app,
            Action::EmbedVideo("https://www.youtube.com/watch?v=abc123".to_string()),
        );
        update(&mut app, Action::EmbedVideo("https://example.com/x".to_string()));
        let body = &app.editor.as_ref().unwrap().draft().content;
        assert_eq!(body.matches("<iframe").count(), 1);
        assert!(body.contains("https://www.youtube.com/embed/abc123"));
    }

    #[test]
    fn test_quit_and_unknown_row_are_safe() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
        assert_eq!(
            update(
                &mut app,
                Action::PageLoaded {
                    row: 99,
                    ticket: PageTicket {
                        source: ListSource::Trending(MediaType::Movie),
                        page: 1,
                        generation: 0,
                    },
                    items: vec![item(1)],
                }
            ),
            Effect::None
        );
    }
}
