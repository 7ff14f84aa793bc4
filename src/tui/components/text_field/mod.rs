//! # TextField Component
//!
//! A bordered text input used for the editor fields and prompt overlays.
//!
//! ## Responsibilities
//!
//! - Capture text input, paste, and editing keys
//! - Single-line mode: Enter submits, newlines are flattened
//! - Multi-line mode: Enter inserts a newline, content scrolls internally
//!
//! The buffer is internal state. Editor fields mirror a value owned by the
//! core draft, so the parent calls `sync()` before handling events; when
//! the value changed underneath (post loaded, embed appended), the buffer
//! is replaced and the cursor moves to the end.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary, wrap_line_count,
    wrapped_lines,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The text changed.
    Changed(String),
    /// Enter in a single-line field.
    Submit(String),
}

pub struct TextField {
    pub buffer: String,
    /// Block title (Prop)
    pub title: String,
    /// Whether the field has keyboard focus (Prop)
    pub focused: bool,
    multiline: bool,
    max_lines: u16,
    cursor: CursorState,
}

impl TextField {
    pub fn single_line(title: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            title: title.into(),
            focused: false,
            multiline: false,
            max_lines: 1,
            cursor: CursorState::new(),
        }
    }

    pub fn multi_line(title: impl Into<String>, max_lines: u16) -> Self {
        Self {
            multiline: true,
            max_lines: max_lines.max(1),
            ..Self::single_line(title)
        }
    }

    /// Mirror an externally owned value.
    pub fn sync(&mut self, value: &str) {
        if self.buffer != value {
            self.buffer = value.to_string();
            self.cursor.move_to_end(&self.buffer);
        }
    }

    /// Height needed for the current content, clamped to `max_lines`.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let lines = wrap_line_count(&self.buffer, inner_width(content_width));
        lines.min(self.max_lines) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) -> Option<FieldEvent> {
        let text = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\r', '\n'], " ")
        };
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, &text);
        self.cursor.pos += text.len();
        Some(FieldEvent::Changed(self.buffer.clone()))
    }

    fn visible_text(&self, content_width: u16) -> String {
        let lines = wrapped_lines(&self.buffer, inner_width(content_width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + self.max_lines as usize).min(lines.len());
        lines[start..end].join("\n")
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;
        self.cursor
            .update_scroll_offset(&self.buffer, area.width, self.max_lines);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str());

        let paragraph = Paragraph::new(self.visible_text(area.width)).block(block);
        frame.render_widget(paragraph, area);

        if self.focused {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Submit if self.multiline => self.insert("\n"),
            TuiEvent::Submit => Some(FieldEvent::Submit(self.buffer.clone())),
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(FieldEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(FieldEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::CursorLeft => {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor.pos < self.buffer.len() {
                    self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor.pos = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor.pos = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            TuiEvent::CursorUp if self.multiline => {
                self.cursor.move_vertically(&self.buffer, -1);
                None
            }
            TuiEvent::CursorDown if self.multiline => {
                self.cursor.move_vertically(&self.buffer, 1);
                None
            }
            _ => None,
        }
    }
}
