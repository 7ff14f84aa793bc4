//! # MediaRow Component
//!
//! One horizontal slider of cards. The row's `Viewport` is kept in scroll
//! units (`UNITS_PER_CELL` per terminal cell); this component only maps
//! those units to cells and draws the cards that fall inside the window.
//! Cards cut by either edge are drawn clipped, so part of the next card
//! stays visible after a page jump.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::catalog::MediaItem;
use crate::core::state::{CARD_CELLS, CARD_UNITS, MediaRow, UNITS_PER_CELL};
use crate::tui::component::Component;

/// Rows are this many lines tall, borders included.
pub const ROW_HEIGHT: u16 = 8;

/// Scroll-unit width of the card window for a row drawn `area_width` cells wide.
pub fn client_width_cells(area_width: u16) -> u16 {
    area_width.saturating_sub(2)
}

pub struct MediaRowView<'a> {
    pub row: &'a MediaRow,
    pub focused: bool,
}

impl<'a> MediaRowView<'a> {
    pub fn new(row: &'a MediaRow, focused: bool) -> Self {
        Self { row, focused }
    }

    fn title(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.row.source().title()),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if self.row.list.is_loading() {
            spans.push(Span::styled(
                "loading... ",
                Style::default().fg(Color::DarkGray),
            ));
        }
        if self.focused && self.row.source().is_genre() {
            spans.push(Span::styled(
                "[g] genre ",
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }

    fn render_card(frame: &mut Frame, area: Rect, item: &MediaItem, selected: bool) {
        let border_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut meta = Vec::new();
        if let Some(year) = item.year() {
            meta.push(year.to_string());
        }
        if let Some(vote) = item.vote_average {
            meta.push(format!("★ {vote:.1}"));
        }
        let lines = vec![
            Line::styled(
                item.display_title().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::styled(meta.join("  "), Style::default().fg(Color::Gray)),
        ];
        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(if selected {
                        BorderType::Thick
                    } else {
                        BorderType::Rounded
                    })
                    .border_style(border_style),
            );
        frame.render_widget(card, area);
    }
}

impl Component for MediaRowView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_style(border_style)
            .title(self.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.row.card_count() == 0 {
            let text = if self.row.list.is_loading() {
                "Loading..."
            } else {
                "Nothing to show"
            };
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let scroll_left = i64::from(self.row.viewport.scroll_left);
        let window_end = i64::from(inner.width);
        let selected = self.row.selected;

        for (index, item) in self.row.cards().enumerate() {
            let start_units = index as i64 * i64::from(CARD_UNITS);
            let start = (start_units - scroll_left).div_euclid(i64::from(UNITS_PER_CELL));
            let end = start + i64::from(CARD_CELLS);
            if end <= 0 {
                continue;
            }
            if start >= window_end {
                break;
            }
            let left = start.max(0);
            let right = end.min(window_end);
            let card_area = Rect {
                x: inner.x + left as u16,
                y: inner.y,
                width: (right - left) as u16,
                height: inner.height,
            };
            let is_selected = self.focused && selected == Some(item.id);
            Self::render_card(frame, card_area, item, is_selected);
        }
    }
}
