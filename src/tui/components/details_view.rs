//! # Details View
//!
//! Full record for one movie or series, inside a vertical `ScrollView`.
//! Shows "Loading..." until the record for the current route arrives.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::catalog::{MediaDetails, poster_url};
use crate::tui::component::Component;

const POSTER_SIZE: &str = "w500";

pub struct DetailsView<'a> {
    pub details: Option<&'a MediaDetails>,
    pub loading: bool,
    pub image_base_url: &'a str,
    pub scroll: &'a mut ScrollViewState,
}

impl<'a> DetailsView<'a> {
    pub fn new(
        details: Option<&'a MediaDetails>,
        loading: bool,
        image_base_url: &'a str,
        scroll: &'a mut ScrollViewState,
    ) -> Self {
        Self {
            details,
            loading,
            image_base_url,
            scroll,
        }
    }

    fn lines(&self, details: &MediaDetails) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::DarkGray);
        let mut lines = vec![Line::styled(
            details.display_title().to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
            lines.push(Line::styled(
                tagline.to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }
        lines.push(Line::default());

        if let Some(date) = details.date() {
            lines.push(Line::from(vec![
                Span::styled("Released  ", label),
                Span::raw(date.to_string()),
            ]));
        }
        if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
            lines.push(Line::from(vec![
                Span::styled("Runtime   ", label),
                Span::raw(format!("{runtime} min")),
            ]));
        }
        if !details.genres.is_empty() {
            let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
            lines.push(Line::from(vec![
                Span::styled("Genres    ", label),
                Span::raw(names.join(", ")),
            ]));
        }
        if let Some(vote) = details.vote_average {
            let votes = details
                .vote_count
                .map(|c| format!(" ({c} votes)"))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled("Rating    ", label),
                Span::styled(format!("★ {vote:.1}"), Style::default().fg(Color::Yellow)),
                Span::raw(votes),
            ]));
        }

        if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
            lines.push(Line::default());
            lines.push(Line::raw(overview.to_string()));
        }

        lines.push(Line::default());
        if let Some(path) = details.poster_path.as_deref() {
            lines.push(Line::from(vec![
                Span::styled("Poster    ", label),
                Span::raw(poster_url(self.image_base_url, POSTER_SIZE, path)),
            ]));
        }
        if let Some(homepage) = details.homepage.as_deref().filter(|h| !h.is_empty()) {
            lines.push(Line::from(vec![
                Span::styled("Homepage  ", label),
                Span::raw(homepage.to_string()),
            ]));
        }
        lines
    }
}

impl Component for DetailsView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(Line::from(" ↑↓ Scroll  Esc Back ").centered());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(details) = self.details else {
            let text = if self.loading {
                "Loading..."
            } else {
                "Could not load details."
            };
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        };

        // One column for the scrollbar
        let content_width = inner.width.saturating_sub(1).max(1);
        let paragraph = Paragraph::new(self.lines(details)).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width).min(u16::MAX as usize) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, inner, self.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Genre;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn details() -> MediaDetails {
        MediaDetails {
            id: 1,
            title: Some("The Thing".to_string()),
            name: None,
            tagline: Some("Man is the warmest place to hide.".to_string()),
            overview: Some("Antarctic researchers meet a shape-shifter.".to_string()),
            vote_average: Some(8.1),
            vote_count: Some(6000),
            genres: vec![Genre {
                id: 27,
                name: "Horror".to_string(),
            }],
            runtime: Some(109),
            release_date: Some("1982-06-25".to_string()),
            first_air_date: None,
            poster_path: Some("/thing.jpg".to_string()),
            homepage: None,
        }
    }

    fn draw(view: &mut DetailsView) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_loading_placeholder() {
        let mut scroll = ScrollViewState::default();
        let mut view = DetailsView::new(None, true, "https://img.test/p", &mut scroll);
        assert!(draw(&mut view).contains("Loading..."));
    }

    #[test]
    fn test_renders_record() {
        let record = details();
        let mut scroll = ScrollViewState::default();
        let mut view = DetailsView::new(Some(&record), false, "https://img.test/p", &mut scroll);
        let text = draw(&mut view);
        assert!(text.contains("The Thing"));
        assert!(text.contains("1982-06-25"));
        assert!(text.contains("109 min"));
        assert!(text.contains("Horror"));
        assert!(text.contains("6000 votes"));
        assert!(text.contains("https://img.test/p/w500/thing.jpg"));
    }
}
