//! Cursor position and internal scrolling for a `TextField`.
//!
//! The text itself lives in the field; every method takes `buffer: &str`
//! explicitly.

use super::text_wrap::{BORDER_OFFSET, inner_width, line_starts, wrap_line_count};
use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(super) struct CursorState {
    /// Byte offset in the buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line
    pub scroll_offset: u16,
    /// Width from the last render, used for vertical movement
    pub last_content_width: u16,
}

/// Wrapped line holding `pos`, given the line starts of its buffer.
fn line_of(starts: &[usize], pos: usize) -> usize {
    starts.partition_point(|&start| start <= pos).saturating_sub(1)
}

/// End of wrapped line `line`: the next line start or newline, whichever is first.
fn line_end(buffer: &str, starts: &[usize], line: usize) -> usize {
    let start = starts[line];
    let newline = buffer[start..]
        .find('\n')
        .map_or(buffer.len(), |i| start + i);
    starts.get(line + 1).map_or(newline, |&next| next.min(newline))
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Put the cursor at the end of `buffer`.
    pub fn move_to_end(&mut self, buffer: &str) {
        self.pos = buffer.len();
    }

    /// Move one wrapped line up (`direction < 0`) or down, keeping the display
    /// column where the target line is long enough. Returns `false` at the
    /// first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let starts = line_starts(buffer, inner_width(self.last_content_width));
        let current = line_of(&starts, self.pos);
        let target = match direction {
            d if d < 0 && current > 0 => current - 1,
            d if d >= 0 && current + 1 < starts.len() => current + 1,
            _ => return false,
        };

        let column = buffer[starts[current]..self.pos].width();
        let end = line_end(buffer, &starts, target);
        let mut pos = starts[target];
        let mut walked = 0;
        for c in buffer[pos..end].chars() {
            let w = c.width().unwrap_or(0);
            if walked + w > column {
                break;
            }
            walked += w;
            pos += c.len_utf8();
        }
        self.pos = pos;
        true
    }

    /// Wrapped line (0-based) the cursor is on.
    pub fn line(&self, buffer: &str, content_width: u16) -> u16 {
        line_of(&line_starts(buffer, inner_width(content_width)), self.pos) as u16
    }

    /// Keep the cursor line inside a window of `max_lines`.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16, max_lines: u16) {
        if wrap_line_count(buffer, inner_width(content_width)) <= max_lines {
            self.scroll_offset = 0;
            return;
        }

        let line = self.line(buffer, content_width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + max_lines {
            self.scroll_offset = line + 1 - max_lines;
        }
    }

    /// Screen (column, row) of the cursor inside a bordered `area`.
    /// Columns count display width, including spaces dropped at a wrap.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let starts = line_starts(buffer, inner_width(area.width));
        let line = line_of(&starts, self.pos);
        let column = buffer[starts[line]..self.pos].width() as u16;
        let visible_line = (line as u16).saturating_sub(self.scroll_offset);
        (
            area.x + BORDER_OFFSET + column,
            area.y + BORDER_OFFSET + visible_line,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_at(pos: usize, width: u16) -> CursorState {
        let mut c = CursorState::new();
        c.pos = pos;
        c.last_content_width = width;
        c
    }

    #[test]
    fn test_vertical_move_across_newline() {
        let buffer = "abc\ndef";
        let mut c = cursor_at(1, 40);
        assert!(c.move_vertically(buffer, 1));
        assert_eq!(c.pos, 5);
        assert!(!c.move_vertically(buffer, 1));
        assert!(c.move_vertically(buffer, -1));
        assert_eq!(c.pos, 1);
    }

    #[test]
    fn test_line_after_trailing_newline() {
        let c = cursor_at(4, 40);
        assert_eq!(c.line("abc\n", 40), 1);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let buffer = "1\n2\n3\n4\n5\n6";
        let mut c = cursor_at(buffer.len(), 40);
        c.update_scroll_offset(buffer, 40, 3);
        assert_eq!(c.scroll_offset, 3);
        c.pos = 0;
        c.update_scroll_offset(buffer, 40, 3);
        assert_eq!(c.scroll_offset, 0);
    }

    #[test]
    fn test_screen_pos_keeps_trailing_space() {
        let c = cursor_at(3, 40);
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(c.screen_pos("ab ", area), (4, 1));
    }

    #[test]
    fn test_vertical_move_between_wrapped_lines() {
        // Width 8 leaves 4 columns: "aaa bbb" wraps to "aaa" / "bbb"
        let buffer = "aaa bbb";
        let mut c = cursor_at(2, 8);
        assert!(c.move_vertically(buffer, 1));
        assert_eq!(c.pos, 6);
        assert!(c.move_vertically(buffer, -1));
        assert_eq!(c.pos, 2);
    }

    #[test]
    fn test_vertical_move_clamps_to_shorter_line() {
        let buffer = "abcdef\nxy";
        let mut c = cursor_at(5, 40);
        assert!(c.move_vertically(buffer, 1));
        assert_eq!(c.pos, buffer.len());
    }

    #[test]
    fn test_screen_pos_on_second_wrapped_line() {
        let c = cursor_at(5, 8);
        let area = Rect::new(0, 0, 8, 4);
        assert_eq!(c.screen_pos("aaa bbb", area), (2, 2));
    }

    #[test]
    fn test_screen_pos_counts_wide_chars() {
        let buffer = "名作";
        let c = cursor_at(buffer.len(), 40);
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(c.screen_pos(buffer, area), (5, 1));
    }
}
