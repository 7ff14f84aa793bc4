//! # TUI Components
//!
//! All UI pieces of the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields and borrow core state:
//! - `TitleBar`: app name, screen, user, status message
//! - `MediaRowView`: one horizontal slider of cards
//! - `BrowseView`: the stack of rows, scrolled to keep the focused one visible
//! - `DetailsView`: the details screen for one title
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state in `TuiState` and emit events:
//! - `TextField`: bordered text input
//! - `PostEditorView`: the post form, focus and field buffers
//! - `GenrePickerState`: overlay for switching a genre row
//! - `PromptState`: one-line input overlay
//!
//! Components receive external data as props, never by reaching into a
//! global. Event handlers return events; the parent turns them into
//! `Action`s for the core reducer.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file, centered_rect)
//! ├── title_bar.rs     (Top status bar)
//! ├── media_row.rs     (One card slider)
//! ├── browse.rs        (Rows stacked vertically)
//! ├── details_view.rs  (Title details)
//! ├── post_editor.rs   (Post form)
//! ├── genre_picker.rs  (Genre overlay)
//! ├── prompt.rs        (Link / post id overlay)
//! └── text_field/      (Text input)
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

mod title_bar;
pub use title_bar::TitleBar;

pub mod browse;
pub mod details_view;
pub mod genre_picker;
pub mod media_row;
pub mod post_editor;
pub mod prompt;
pub mod text_field;

pub use browse::BrowseView;
pub use details_view::DetailsView;
pub use genre_picker::{GenrePicker, GenrePickerEvent, GenrePickerState};
pub use post_editor::{EditorEvent, PostEditorScreen, PostEditorView};
pub use prompt::{PromptEvent, PromptKind, PromptState};

/// Rect of `percent_x` by `percent_y` centered in `outer`.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_outer() {
        let outer = Rect::new(0, 0, 100, 50);
        let center = centered_rect(60, 20, outer);
        assert_eq!(center.width, 60);
        assert_eq!(center.height, 10);
        assert_eq!(center.x, 20);
        assert_eq!(center.y, 20);
    }
}
