//! # Genre Picker Component
//!
//! Overlay for switching the focused genre row to another genre. Opened
//! with `g` on a genre row.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `GenrePickerState` lives in `TuiState`
//! - `GenrePicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::catalog::{Genre, MediaType, genres_for};
use crate::tui::component::EventHandler;
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

/// Persistent state for the genre picker overlay.
pub struct GenrePickerState {
    /// Row the choice applies to
    pub row: usize,
    pub media: MediaType,
    pub genres: Vec<Genre>,
    pub selected: usize,
    pub list_state: ListState,
}

impl GenrePickerState {
    /// Opens with `current` highlighted when it is in the table.
    pub fn new(row: usize, media: MediaType, current: Option<&Genre>) -> Self {
        let genres = genres_for(media);
        let selected = current
            .and_then(|c| genres.iter().position(|g| g.id == c.id))
            .unwrap_or(0);
        let mut list_state = ListState::default();
        if !genres.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            row,
            media,
            genres,
            selected,
            list_state,
        }
    }
}

/// Events emitted by the genre picker.
#[derive(Debug, Clone, PartialEq)]
pub enum GenrePickerEvent {
    Select { row: usize, genre: Genre },
    Dismiss,
}

impl EventHandler for GenrePickerState {
    type Event = GenrePickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<GenrePickerEvent> {
        match event {
            TuiEvent::Escape => Some(GenrePickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                if !self.genres.is_empty() {
                    self.selected = (self.selected + 1).min(self.genres.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .genres
                .get(self.selected)
                .map(|genre| GenrePickerEvent::Select {
                    row: self.row,
                    genre: genre.clone(),
                }),
            _ => None,
        }
    }
}

/// Transient render wrapper for the genre picker overlay.
pub struct GenrePicker<'a> {
    state: &'a mut GenrePickerState,
}

impl<'a> GenrePicker<'a> {
    pub fn new(state: &'a mut GenrePickerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(40, 70, area);
        frame.render_widget(Clear, overlay);

        let title = match self.state.media {
            MediaType::Movie => " Movie genres ",
            MediaType::Tv => " TV genres ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .state
            .genres
            .iter()
            .enumerate()
            .map(|(i, genre)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(genre.name.clone(), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
