//! # Post Editor View
//!
//! The post form. Field buffers and focus live here; the draft itself lives
//! in `core::editor::PostEditor`, so every edit is reported as an `Action`
//! and the buffers are re-synced from the draft before each event and frame.
//!
//! ```text
//! ┌ Title ───────────────────────────┐
//! └──────────────────────────────────┘
//!  Category  < Movies >
//! ┌ Image file ──────────────────────┐
//! └──────────────────────────────────┘
//!  Uploading 40%
//! ┌ Content ─────────────────────────┐
//! │                                  │
//! └──────────────────────────────────┘
//!  ^U Upload  ^E Video  ^L File link  ^S Publish  Esc Back
//! ```

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::content::Category;
use crate::core::action::Action;
use crate::core::editor::{EditorMode, PostEditor, UploadState};
use crate::core::session::Session;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::prompt::PromptKind;
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

const CONTENT_LINES: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Category,
    ImageFile,
    Content,
}

impl EditorField {
    const ORDER: [EditorField; 4] = [
        EditorField::Title,
        EditorField::Category,
        EditorField::ImageFile,
        EditorField::Content,
    ];

    fn step(self, delta: isize) -> EditorField {
        let len = Self::ORDER.len() as isize;
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ORDER[(index + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug)]
pub enum EditorEvent {
    Dispatch(Action),
    OpenPrompt(PromptKind),
}

pub struct PostEditorView {
    pub focus: EditorField,
    title: TextField,
    image: TextField,
    content: TextField,
    category: Category,
}

impl Default for PostEditorView {
    fn default() -> Self {
        Self::new()
    }
}

impl PostEditorView {
    pub fn new() -> Self {
        let mut view = Self {
            focus: EditorField::Title,
            title: TextField::single_line(" Title "),
            image: TextField::single_line(" Image file "),
            content: TextField::multi_line(" Content (HTML) ", CONTENT_LINES),
            category: Category::default(),
        };
        view.apply_focus();
        view
    }

    /// Mirror the draft into the field buffers.
    pub fn sync(&mut self, editor: &PostEditor) {
        let draft = editor.draft();
        self.title.sync(&draft.title);
        self.content.sync(&draft.content);
        self.category = draft.category;
        let selected = editor
            .selected_file()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if selected.trim() != self.image.buffer.trim() {
            self.image.sync(&selected);
        }
    }

    fn apply_focus(&mut self) {
        self.title.focused = self.focus == EditorField::Title;
        self.image.focused = self.focus == EditorField::ImageFile;
        self.content.focused = self.focus == EditorField::Content;
    }

    fn move_focus(&mut self, delta: isize) {
        self.focus = self.focus.step(delta);
        self.apply_focus();
    }
}

impl EventHandler for PostEditorView {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<EditorEvent> {
        match event {
            TuiEvent::FocusNext => {
                self.move_focus(1);
                return None;
            }
            TuiEvent::FocusPrev => {
                self.move_focus(-1);
                return None;
            }
            TuiEvent::Escape => return Some(EditorEvent::Dispatch(Action::Back)),
            TuiEvent::Upload => return Some(EditorEvent::Dispatch(Action::StartUpload)),
            TuiEvent::Save => return Some(EditorEvent::Dispatch(Action::SubmitPost)),
            TuiEvent::Embed => return Some(EditorEvent::OpenPrompt(PromptKind::EmbedVideo)),
            TuiEvent::FileLink => return Some(EditorEvent::OpenPrompt(PromptKind::FileLink)),
            _ => {}
        }

        match self.focus {
            EditorField::Title => match self.title.handle_event(event)? {
                FieldEvent::Changed(title) => Some(EditorEvent::Dispatch(Action::EditTitle(title))),
                FieldEvent::Submit(_) => {
                    self.move_focus(1);
                    None
                }
            },
            EditorField::Category => {
                let category = match event {
                    TuiEvent::CursorLeft => self.category.prev(),
                    TuiEvent::CursorRight => self.category.next(),
                    TuiEvent::Submit => {
                        self.move_focus(1);
                        return None;
                    }
                    _ => return None,
                };
                self.category = category;
                Some(EditorEvent::Dispatch(Action::EditCategory(category)))
            }
            EditorField::ImageFile => match self.image.handle_event(event)? {
                FieldEvent::Changed(path) => {
                    let path = path.trim();
                    let selected = (!path.is_empty()).then(|| PathBuf::from(path));
                    Some(EditorEvent::Dispatch(Action::SelectFile(selected)))
                }
                FieldEvent::Submit(_) => Some(EditorEvent::Dispatch(Action::StartUpload)),
            },
            EditorField::Content => match self.content.handle_event(event)? {
                FieldEvent::Changed(content) => {
                    Some(EditorEvent::Dispatch(Action::EditContent(content)))
                }
                FieldEvent::Submit(_) => None,
            },
        }
    }
}

/// Transient render wrapper: the persistent view plus the props it needs.
pub struct PostEditorScreen<'a> {
    pub view: &'a mut PostEditorView,
    pub editor: &'a PostEditor,
    pub session: &'a Session,
}

impl<'a> PostEditorScreen<'a> {
    pub fn new(view: &'a mut PostEditorView, editor: &'a PostEditor, session: &'a Session) -> Self {
        Self {
            view,
            editor,
            session,
        }
    }

    fn heading(&self) -> Line<'static> {
        let text = match self.editor.mode() {
            EditorMode::Create => "New post".to_string(),
            EditorMode::Update { post_id } if !self.editor.is_loaded() => {
                format!("Loading post {post_id}...")
            }
            EditorMode::Update { post_id } => format!("Editing post {post_id}"),
        };
        Line::styled(text, Style::default().add_modifier(Modifier::BOLD))
    }

    fn category_line(&self) -> Line<'static> {
        let focused = self.view.focus == EditorField::Category;
        let value_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(" Category  ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("< {} >", self.view.category.label()), value_style),
        ])
    }

    fn upload_line(&self) -> Line<'static> {
        match self.editor.upload() {
            UploadState::InProgress(percent) => Line::styled(
                format!(" Uploading {percent}%"),
                Style::default().fg(Color::Yellow),
            ),
            UploadState::Failed(message) => {
                Line::styled(format!(" {message}"), Style::default().fg(Color::Red))
            }
            UploadState::Idle => match self.editor.draft().image.as_deref() {
                Some(url) => {
                    Line::styled(format!(" Image: {url}"), Style::default().fg(Color::Green))
                }
                None => Line::styled(
                    " Type a file path, then ^U to upload",
                    Style::default().fg(Color::DarkGray),
                ),
            },
        }
    }

    fn hint_line(&self) -> Line<'static> {
        let dim = Style::default().fg(Color::DarkGray);
        let publish = if self.editor.submit_enabled(self.session) {
            Style::default().fg(Color::Green)
        } else {
            dim
        };
        let upload = if self.editor.upload_enabled() {
            Style::default().fg(Color::Green)
        } else {
            dim
        };
        Line::from(vec![
            Span::styled(" ^U Upload", upload),
            Span::styled("  ^E Video  ^L File link  ", dim),
            Span::styled("^S Publish", publish),
            Span::styled("  Tab Next field  Esc Back", dim),
        ])
    }
}

impl Component for PostEditorScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.view.sync(self.editor);

        let content_height = self.view.content.calculate_height(area.width);
        let [
            heading,
            title,
            category,
            image,
            upload,
            content,
            error,
            _,
            hints,
        ] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(content_height),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(self.heading(), heading);
        self.view.title.render(frame, title);
        frame.render_widget(self.category_line(), category);
        self.view.image.render(frame, image);
        frame.render_widget(self.upload_line(), upload);
        self.view.content.render(frame, content);
        if let Some(message) = self.editor.publish_error() {
            frame.render_widget(
                Paragraph::new(format!(" {message}")).style(Style::default().fg(Color::Red)),
                error,
            );
        }
        frame.render_widget(self.hint_line(), hints);
    }
}
