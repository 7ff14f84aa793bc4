//! Wrapping helpers and dimensional constants shared by `TextField` and its
//! cursor. Stateless, no dependency on either.

/// Borders (2) plus a gutter for the cursor and scrollbar (2)
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// textwrap options for a field of the given inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after borders and gutter. 0 if the area is too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrapped lines of `text`, including the empty line after a trailing
/// newline that textwrap leaves out.
pub(super) fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }
    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Byte offset where each wrapped line of `text` starts. Spaces dropped at a
/// wrap point belong to the line before it.
pub(super) fn line_starts(text: &str, width: u16) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut base = 0;
    for logical in text.split('\n') {
        if width == 0 {
            starts.push(base);
        } else {
            let mut offset = 0;
            for segment in textwrap::wrap(logical, wrap_options(width)) {
                offset += logical[offset..].find(segment.as_ref()).unwrap_or(0);
                starts.push(base + offset);
                offset += segment.len();
            }
        }
        base += logical.len() + 1;
    }
    starts
}

pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    wrapped_lines(text, width).len() as u16
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
