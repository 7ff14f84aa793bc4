//! # Browse View
//!
//! Rows stacked top to bottom. Only as many rows as fit are drawn; the
//! first drawn row is kept in `TuiState` and moved just enough to keep the
//! focused row on screen.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::state::MediaRow;
use crate::tui::component::Component;
use crate::tui::components::media_row::{MediaRowView, ROW_HEIGHT};

/// Smallest change to `first` that keeps `focused` among `visible` rows.
pub fn first_row(first: usize, focused: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if focused < first {
        focused
    } else if focused >= first + visible {
        focused + 1 - visible
    } else {
        first
    }
}

pub struct BrowseView<'a> {
    pub rows: &'a [MediaRow],
    pub focused: usize,
    /// First drawn row, persisted between frames
    pub offset: &'a mut usize,
}

impl<'a> BrowseView<'a> {
    pub fn new(rows: &'a [MediaRow], focused: usize, offset: &'a mut usize) -> Self {
        Self {
            rows,
            focused,
            offset,
        }
    }
}

impl Component for BrowseView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = (area.height / ROW_HEIGHT).max(1) as usize;
        *self.offset = first_row(*self.offset, self.focused, visible);

        let mut y = area.y;
        for (index, row) in self.rows.iter().enumerate().skip(*self.offset) {
            if y >= area.bottom() {
                break;
            }
            let height = ROW_HEIGHT.min(area.bottom() - y);
            let row_area = Rect {
                y,
                height,
                ..area
            };
            MediaRowView::new(row, index == self.focused).render(frame, row_area);
            y += height;
        }
    }
}
