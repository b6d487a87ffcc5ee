//! Visual line layout for the journal text area.
//!
//! The journal is laid out into visual lines (byte ranges into the buffer),
//! wrapping at spaces where possible and hard-breaking long words. Rendering
//! and cursor placement both go through `layout_lines`, so the cursor always
//! lands where the text was drawn.

use unicode_width::UnicodeWidthChar;

/// Borders (2) + horizontal padding (2)
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Visible text rows before the box scrolls internally
pub(super) const JOURNAL_ROWS: u16 = 5;
/// Offset from area edge to content (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// One visual line: `buffer[start..end]`, never containing a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct VisualLine {
    pub start: usize,
    pub end: usize,
}

pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

pub(super) fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Lays `text` out into visual lines no wider than `width` columns.
///
/// Always returns at least one line. A trailing newline yields a final empty
/// line so the cursor has somewhere to sit.
pub(super) fn layout_lines(text: &str, width: u16) -> Vec<VisualLine> {
    let width = width as usize;
    let mut lines = Vec::new();
    let mut seg_start = 0;

    for segment in text.split('\n') {
        let seg_end = seg_start + segment.len();
        if width == 0 {
            lines.push(VisualLine { start: seg_start, end: seg_end });
        } else {
            wrap_segment(text, seg_start, seg_end, width, &mut lines);
        }
        seg_start = seg_end + 1;
    }

    lines
}

fn wrap_segment(text: &str, seg_start: usize, seg_end: usize, width: usize, out: &mut Vec<VisualLine>) {
    let mut line_start = seg_start;
    let mut line_width = 0;
    // Byte offset just past the most recent space on the current line
    let mut break_after_space: Option<usize> = None;

    for (rel, c) in text[seg_start..seg_end].char_indices() {
        let idx = seg_start + rel;
        let w = char_width(c);

        while line_width + w > width && idx > line_start {
            let break_at = break_after_space
                .filter(|&b| b > line_start && b <= idx)
                .unwrap_or(idx);
            out.push(VisualLine { start: line_start, end: break_at });
            line_start = break_at;
            line_width = display_width(&text[line_start..idx]);
            break_after_space = None;
        }

        line_width += w;
        if c == ' ' {
            break_after_space = Some(idx + c.len_utf8());
        }
    }

    out.push(VisualLine { start: line_start, end: seg_end });
}

/// Index of the visual line holding byte offset `pos`.
///
/// At a wrap point the cursor belongs to the following line, matching where
/// the next typed character would appear.
pub(super) fn line_of(lines: &[VisualLine], pos: usize) -> usize {
    lines
        .iter()
        .rposition(|line| line.start <= pos)
        .unwrap_or(0)
}

/// Byte offset on `line` whose display column is closest to `column`
/// without passing it.
pub(super) fn offset_at_column(text: &str, line: VisualLine, column: usize) -> usize {
    let mut used = 0;
    for (rel, c) in text[line.start..line.end].char_indices() {
        let w = char_width(c);
        if used + w > column {
            return line.start + rel;
        }
        used += w;
    }
    line.end
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Readline `backward-word`: skip separators, then the word before them.
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut boundary = pos;
    let mut in_word = false;
    for (i, c) in text[..pos].char_indices().rev() {
        if is_word_char(c) {
            in_word = true;
        } else if in_word {
            break;
        }
        boundary = i;
    }
    boundary
}

/// Readline `forward-word`: skip separators, then the word after them.
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut in_word = false;
    for (rel, c) in text[pos..].char_indices() {
        if is_word_char(c) {
            in_word = true;
        } else if in_word {
            return pos + rel;
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(text: &str, width: u16) -> Vec<&str> {
        layout_lines(text, width)
            .into_iter()
            .map(|l| &text[l.start..l.end])
            .collect()
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(rendered("", 10), vec![""]);
    }

    #[test]
    fn explicit_newlines_split_lines() {
        assert_eq!(rendered("a\nb\nc", 10), vec!["a", "b", "c"]);
    }

    #[test]
    fn trailing_newline_adds_empty_line() {
        assert_eq!(rendered("hello\n", 10), vec!["hello", ""]);
    }

    #[test]
    fn wraps_at_last_space() {
        assert_eq!(rendered("good day today", 9), vec!["good day ", "today"]);
    }

    #[test]
    fn hard_breaks_long_words() {
        assert_eq!(rendered("aaaaaaaaaa", 4), vec!["aaaa", "aaaa", "aa"]);
    }

    #[test]
    fn wide_chars_count_double() {
        // Each CJK character occupies two columns
        assert_eq!(rendered("今天很好", 4), vec!["今天", "很好"]);
    }

    #[test]
    fn zero_width_keeps_logical_lines() {
        assert_eq!(rendered("ab\ncd", 0), vec!["ab", "cd"]);
    }

    #[test]
    fn line_of_prefers_following_line_at_wrap_point() {
        let lines = layout_lines("aaaabbbb", 4);
        assert_eq!(line_of(&lines, 3), 0);
        assert_eq!(line_of(&lines, 4), 1);
        assert_eq!(line_of(&lines, 8), 1);
    }

    #[test]
    fn offset_at_column_clamps_to_line_end() {
        let text = "ab\nabcdef";
        let lines = layout_lines(text, 20);
        assert_eq!(offset_at_column(text, lines[0], 5), 2);
        assert_eq!(offset_at_column(text, lines[1], 3), 6);
    }

    #[test]
    fn char_boundaries_handle_multibyte() {
        let s = "a🔥b";
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(prev_char_boundary(s, 5), 1);
        assert_eq!(prev_char_boundary(s, 1), 0);
        assert_eq!(next_char_boundary(s, 6), 6);
    }

    #[test]
    fn word_boundaries() {
        assert_eq!(prev_word_boundary("hello world", 11), 6);
        assert_eq!(prev_word_boundary("hello   world", 8), 0);
        assert_eq!(prev_word_boundary("foo.bar", 7), 4);
        assert_eq!(next_word_boundary("hello world", 0), 5);
        assert_eq!(next_word_boundary("hello world", 5), 11);
        assert_eq!(next_word_boundary("hello_world test", 0), 11);
    }
}
