//! # Prompt Overlay
//!
//! One-line input box shown over the current screen: a video link to embed,
//! a file link to add, or the id of a post to edit.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    EmbedVideo,
    FileLink,
    EditPost,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            PromptKind::EmbedVideo => " Video link (YouTube or Vimeo) ",
            PromptKind::FileLink => " File link ",
            PromptKind::EditPost => " Post id ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Submit(PromptKind, String),
    Dismiss,
}

pub struct PromptState {
    pub kind: PromptKind,
    field: TextField,
}

impl PromptState {
    pub fn new(kind: PromptKind) -> Self {
        let mut field = TextField::single_line(kind.title());
        field.focused = true;
        Self { kind, field }
    }
}

impl EventHandler for PromptState {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PromptEvent> {
        if matches!(event, TuiEvent::Escape) {
            return Some(PromptEvent::Dismiss);
        }
        match self.field.handle_event(event) {
            Some(FieldEvent::Submit(text)) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    Some(PromptEvent::Dismiss)
                } else {
                    Some(PromptEvent::Submit(self.kind, text))
                }
            }
            _ => None,
        }
    }
}

impl Component for PromptState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 20, area);
        frame.render_widget(Clear, overlay);

        let height = 3.min(overlay.height);
        let field_area = Rect { height, ..overlay };
        self.field.render(frame, field_area);

        if overlay.height > height {
            let hint_area = Rect {
                y: overlay.y + height,
                height: 1,
                ..overlay
            };
            frame.render_widget(
                Paragraph::new(" Enter Confirm  Esc Cancel ")
                    .style(Style::default().fg(Color::DarkGray)),
                hint_area,
            );
        }
    }
}
