//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values, and runs the
//! background work that `update()` asks for through `Effect`s.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms waiting for input and
//! redraws only after an input event or a background result.
//!
//! ## Background Work
//!
//! Every task is spawned into a `TaskScope` slot (one per row, plus the
//! detail fetch, post load, upload and submit). Starting new work in a slot
//! drops the previous `TaskGuard`, which aborts the old task. Leaving a
//! screen cancels its slots the same way.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::collections::HashMap;
use std::future::Future;
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;
use tui_scrollview::ScrollViewState;

use crate::StartView;
use crate::catalog::{ListSource, MediaType, MetadataProvider, TmdbProvider};
use crate::content::{
    ContentApi, HttpContentApi, HttpObjectStorage, ObjectStorage, UploadProgress, upload_file,
};
use crate::core::action::{Action, Effect, TaskScope, update};
use crate::core::config::ResolvedConfig;
use crate::core::detail::DetailTicket;
use crate::core::editor::{EditorMode, SubmitRequest};
use crate::core::navigator::ScrollDirection;
use crate::core::pagination::PageTicket;
use crate::core::state::{App, Route};
use crate::tui::component::EventHandler;
use crate::tui::components::media_row::client_width_cells;
use crate::tui::components::{
    EditorEvent, GenrePickerEvent, GenrePickerState, PostEditorView, PromptEvent, PromptKind,
    PromptState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// First drawn browse row
    pub browse_offset: usize,
    pub details_scroll: ScrollViewState,
    pub editor_view: PostEditorView,
    // Overlays (None = hidden)
    pub genre_picker: Option<GenrePickerState>,
    pub prompt: Option<PromptState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            browse_offset: 0,
            details_scroll: ScrollViewState::default(),
            editor_view: PostEditorView::new(),
            genre_picker: None,
            prompt: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Harmlessly ignored by terminals without the Kitty keyboard protocol
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Aborts its task when dropped.
struct TaskGuard(AbortHandle);

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Running background work, one task per scope.
#[derive(Default)]
struct Tasks {
    guards: HashMap<TaskScope, TaskGuard>,
}

impl Tasks {
    fn spawn<F>(&mut self, scope: TaskScope, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        if self
            .guards
            .insert(scope, TaskGuard(handle.abort_handle()))
            .is_some()
        {
            debug!("Replaced running task in {:?}", scope);
        }
    }

    fn cancel(&mut self, scopes: &[TaskScope]) {
        for scope in scopes {
            if self.guards.remove(scope).is_some() {
                debug!("Cancelled task in {:?}", scope);
            }
        }
    }
}

/// Build the catalog and content clients from a resolved config.
fn build_services(
    config: &ResolvedConfig,
) -> (
    Arc<dyn MetadataProvider>,
    Arc<dyn ContentApi>,
    Arc<dyn ObjectStorage>,
) {
    let api_key = config.tmdb_api_key.clone().unwrap_or_else(|| {
        warn!("No TMDB API key configured; rows will stay empty");
        String::new()
    });
    let catalog = Arc::new(TmdbProvider::new(
        api_key,
        Some(config.tmdb_base_url.clone()),
        config.tmdb_language.clone(),
    ));
    let content = Arc::new(HttpContentApi::new(
        config.content_base_url.clone(),
        config.session_token.clone(),
    ));
    let storage = Arc::new(HttpObjectStorage::new(
        config.storage_base_url.clone(),
        config.storage_bucket.clone(),
    ));
    (catalog, content, storage)
}

/// Actions to run before the first frame.
fn startup_actions(width: u16, start_view: StartView, edit: Option<String>) -> Vec<Action> {
    let mut actions = vec![
        Action::Resize {
            width: client_width_cells(width),
        },
        Action::MountBrowse,
    ];
    match (edit, start_view) {
        (Some(post_id), _) => actions.push(Action::OpenEditor(EditorMode::Update { post_id })),
        (None, StartView::NewPost) => actions.push(Action::OpenEditor(EditorMode::Create)),
        (None, StartView::Browse) => {}
    }
    actions
}

pub fn run(config: ResolvedConfig, edit: Option<String>) -> std::io::Result<()> {
    let (catalog, content, storage) = build_services(&config);
    let mut app = App::from_config(catalog, content, storage, &config);
    let mut tui = TuiState::new();
    let mut tasks = Tasks::default();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let width = terminal.size().map(|s| s.width).unwrap_or(80);
    let mut should_quit = false;
    for action in startup_actions(width, config.start_view, edit) {
        should_quit |= dispatch(&mut app, &mut tui, &mut tasks, &tx, action);
    }

    let mut needs_redraw = true;
    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                let width = terminal.size().map(|s| s.width).unwrap_or(80);
                let action = Action::Resize {
                    width: client_width_cells(width),
                };
                should_quit |= dispatch(&mut app, &mut tui, &mut tasks, &tx, action);
                continue;
            }
            for action in handle_event(&app, &mut tui, event) {
                should_quit |= dispatch(&mut app, &mut tui, &mut tasks, &tx, action);
            }
            if should_quit {
                break;
            }
        }

        // Results from background tasks
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= dispatch(&mut app, &mut tui, &mut tasks, &tx, action);
        }
    }

    info!("Shutting down");
    drop(tasks);
    ratatui::restore();
    Ok(())
}

/// Run one action through the reducer and start what it asks for.
/// Returns true when the app should quit.
fn dispatch(
    app: &mut App,
    tui: &mut TuiState,
    tasks: &mut Tasks,
    tx: &mpsc::Sender<Action>,
    action: Action,
) -> bool {
    let route_before = std::mem::discriminant(&app.route);
    let opens_editor = matches!(action, Action::OpenEditor(_));
    let effect = update(app, action);

    if opens_editor {
        tui.editor_view = PostEditorView::new();
    }
    if std::mem::discriminant(&app.route) != route_before
        && matches!(app.route, Route::Details { .. })
    {
        tui.details_scroll = ScrollViewState::default();
    }

    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::FetchPages(tickets) => {
            for (row, ticket) in tickets {
                tasks.spawn(
                    TaskScope::Row(row),
                    fetch_page(app.catalog.clone(), row, ticket, tx.clone()),
                );
            }
        }
        Effect::FetchDetail(ticket) => {
            tasks.spawn(
                TaskScope::Detail,
                fetch_detail(app.catalog.clone(), ticket, tx.clone()),
            );
        }
        Effect::LoadPost { editor, post_id } => {
            tasks.spawn(
                TaskScope::PostLoad,
                load_post(app.content.clone(), editor, post_id, tx.clone()),
            );
        }
        Effect::Upload { editor, path } => {
            tasks.spawn(
                TaskScope::Upload,
                upload_image(app.storage.clone(), editor, path, tx.clone()),
            );
        }
        Effect::Submit { editor, request } => {
            tasks.spawn(
                TaskScope::Submit,
                submit_post(app.content.clone(), editor, request, tx.clone()),
            );
        }
        Effect::Cancel(scopes) => tasks.cancel(&scopes),
    }
    false
}

/// Translate one input event into actions, updating overlays on the way.
fn handle_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Vec<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return vec![Action::Quit];
    }

    // Overlays take every event while open
    if let Some(picker) = tui.genre_picker.as_mut() {
        return match picker.handle_event(&event) {
            Some(GenrePickerEvent::Select { row, genre }) => {
                tui.genre_picker = None;
                vec![Action::ChangeGenre { row, genre }]
            }
            Some(GenrePickerEvent::Dismiss) => {
                tui.genre_picker = None;
                vec![]
            }
            None => vec![],
        };
    }
    if let Some(prompt) = tui.prompt.as_mut() {
        return match prompt.handle_event(&event) {
            Some(PromptEvent::Submit(kind, text)) => {
                tui.prompt = None;
                vec![prompt_action(kind, text)]
            }
            Some(PromptEvent::Dismiss) => {
                tui.prompt = None;
                vec![]
            }
            None => vec![],
        };
    }

    match &app.route {
        Route::Browse => match event {
            TuiEvent::InputChar('g') => {
                if let Some(row) = app.focused()
                    && let ListSource::Genre { media, genre } = row.source()
                {
                    tui.genre_picker =
                        Some(GenrePickerState::new(app.focused_row, *media, Some(genre)));
                }
                vec![]
            }
            TuiEvent::InputChar('e') => {
                tui.prompt = Some(PromptState::new(PromptKind::EditPost));
                vec![]
            }
            other => browse_action(&other).into_iter().collect(),
        },
        Route::Details { .. } => {
            match event {
                TuiEvent::Escape | TuiEvent::Backspace => return vec![Action::Back],
                TuiEvent::CursorUp => tui.details_scroll.scroll_up(),
                TuiEvent::CursorDown => tui.details_scroll.scroll_down(),
                _ => {}
            }
            vec![]
        }
        Route::Editor => {
            if let Some(editor) = app.editor.as_ref() {
                tui.editor_view.sync(editor);
            }
            match tui.editor_view.handle_event(&event) {
                Some(EditorEvent::Dispatch(action)) => vec![action],
                Some(EditorEvent::OpenPrompt(kind)) => {
                    tui.prompt = Some(PromptState::new(kind));
                    vec![]
                }
                None => vec![],
            }
        }
        Route::Published { .. } => match event {
            TuiEvent::Escape | TuiEvent::Submit => vec![Action::Back],
            _ => vec![],
        },
    }
}

/// Browse keys that map straight to one action.
fn browse_action(event: &TuiEvent) -> Option<Action> {
    let action = match event {
        TuiEvent::InputChar('q') => Action::Quit,
        TuiEvent::CursorUp => Action::PrevRow,
        TuiEvent::CursorDown => Action::NextRow,
        TuiEvent::CursorLeft => Action::MoveCard(ScrollDirection::Back),
        TuiEvent::CursorRight => Action::MoveCard(ScrollDirection::Forward),
        TuiEvent::InputChar('[') => Action::ScrollRow(ScrollDirection::Back),
        TuiEvent::InputChar(']') => Action::ScrollRow(ScrollDirection::Forward),
        TuiEvent::Submit => Action::OpenDetails,
        TuiEvent::InputChar('n') => Action::OpenEditor(EditorMode::Create),
        _ => return None,
    };
    Some(action)
}

fn prompt_action(kind: PromptKind, text: String) -> Action {
    match kind {
        PromptKind::EmbedVideo => Action::EmbedVideo(text),
        PromptKind::FileLink => Action::AddFileLink(text),
        PromptKind::EditPost => Action::OpenEditor(EditorMode::Update { post_id: text }),
    }
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

async fn fetch_page(
    catalog: Arc<dyn MetadataProvider>,
    row: usize,
    ticket: PageTicket<ListSource>,
    tx: mpsc::Sender<Action>,
) {
    debug!("Fetching {} page {}", ticket.source.title(), ticket.page);
    let result = ticket.source.fetch(catalog.as_ref(), ticket.page).await;
    let action = match result {
        Ok(page) => Action::PageLoaded {
            row,
            ticket,
            items: page.results,
        },
        Err(e) => {
            warn!("Failed to load {} page {}: {}", ticket.source.title(), ticket.page, e);
            Action::PageFailed {
                row,
                ticket,
                error: e.to_string(),
            }
        }
    };
    send(&tx, action);
}

async fn fetch_detail(
    catalog: Arc<dyn MetadataProvider>,
    ticket: DetailTicket<(MediaType, u64)>,
    tx: mpsc::Sender<Action>,
) {
    let (media, id) = ticket.id;
    let result = catalog.details(media, id).await;
    if let Err(e) = &result {
        warn!("Failed to load {} {}: {}", media.label(), id, e);
    }
    send(&tx, Action::DetailResolved { ticket, result });
}

async fn load_post(
    content: Arc<dyn ContentApi>,
    editor: u64,
    post_id: String,
    tx: mpsc::Sender<Action>,
) {
    let action = match content.get_post(&post_id).await {
        Ok(post) => Action::PostLoaded { editor, post },
        Err(e) => {
            warn!("Failed to load post {}: {}", post_id, e);
            Action::PostLoadFailed {
                editor,
                error: e.user_message(),
            }
        }
    };
    send(&tx, action);
}

async fn upload_image(
    storage: Arc<dyn ObjectStorage>,
    editor: u64,
    path: std::path::PathBuf,
    tx: mpsc::Sender<Action>,
) {
    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<UploadProgress>(16);

    // Forwards progress until the upload drops its sender
    let forward_tx = tx.clone();
    let forward = async move {
        while let Some(progress) = progress_rx.recv().await {
            send(&forward_tx, Action::UploadProgress { editor, progress });
        }
    };

    let (result, ()) = tokio::join!(upload_file(storage.as_ref(), &path, progress_tx), forward);
    let action = match result {
        Ok(url) => {
            info!("Uploaded {} to {}", path.display(), url);
            Action::UploadFinished { editor, url }
        }
        Err(e) => {
            warn!("Upload of {} failed: {}", path.display(), e);
            Action::UploadFailed {
                editor,
                error: e.to_string(),
            }
        }
    };
    send(&tx, action);
}

async fn submit_post(
    content: Arc<dyn ContentApi>,
    editor: u64,
    request: SubmitRequest,
    tx: mpsc::Sender<Action>,
) {
    let result = match &request {
        SubmitRequest::Create(payload) => content.create_post(payload).await,
        SubmitRequest::Update {
            post_id,
            user_id,
            payload,
        } => content.update_post(post_id, user_id, payload).await,
    };
    let action = match result {
        Ok(post) => Action::PostPublished { editor, post },
        Err(e) => {
            warn!("Publishing failed: {}", e);
            Action::PublishFailed {
                editor,
                error: e.user_message(),
            }
        }
    };
    send(&tx, action);
}
