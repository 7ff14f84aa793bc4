//! # TitleBar Component
//!
//! Top status bar: app name, current screen, signed-in user, and the latest
//! status message.
//!
//! ## Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("Browse", "ana", "Loading...");
//! title_bar.render(frame, area);
//! ```
//!
//! Props live in struct fields rather than render() parameters because the
//! `Component` trait fixes the render() signature.
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"reelpress | Browse | ana | Loading..."`
//! 2. **Default**: `"reelpress | Browse | ana"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Name of the current screen (e.g., "Browse", "New post")
    pub route_label: String,
    /// Signed-in user, or "guest"
    pub user_name: String,
    /// Status message (e.g., "Publishing...", "Image uploaded")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(
        route_label: impl Into<String>,
        user_name: impl Into<String>,
        status_message: impl Into<String>,
    ) -> Self {
        Self {
            route_label: route_label.into(),
            user_name: user_name.into(),
            status_message: status_message.into(),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let dim = Style::default().fg(Color::DarkGray);
        let mut spans = vec![
            Span::styled(
                "reelpress",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", dim),
            Span::raw(self.route_label.as_str()),
            Span::styled(" | ", dim),
            Span::styled(self.user_name.as_str(), Style::default().fg(Color::Cyan)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", dim));
            spans.push(Span::styled(
                self.status_message.as_str(),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
