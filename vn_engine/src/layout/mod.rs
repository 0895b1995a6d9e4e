//! Text layout - turns raw story text into wrapped, centered display lines.
//!
//! Layout happens in three steps:
//! 1. **Dedent**: strip the margin shared by every non-blank line
//! 2. **Wrap**: greedily pack each logical line's words into `width` columns
//! 3. **Center**: pad every non-blank line by half the slack of the widest one
//!
//! Blank logical lines survive as exactly one empty display line. Widths are
//! measured in terminal columns, not bytes: control characters and ANSI CSI
//! escape sequences take no columns, wide glyphs take two.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

/// Columns a tab stop spans.
const TAB_WIDTH: usize = 8;

/// Wrap `text` to `width` columns and center the resulting block.
///
/// The output is pure: the same text and width always give the same lines.
pub fn wrap_center(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let dedented = dedent(text);

    let mut wrapped = Vec::new();
    for line in trim_blank_edges(&dedented) {
        if is_blank(line) {
            wrapped.push(String::new());
        } else {
            wrapped.extend(wrap_line(line, width));
        }
    }

    let longest = wrapped.iter().map(|l| display_width(l)).max().unwrap_or(0);
    let left_pad = " ".repeat(width.saturating_sub(longest) / 2);

    wrapped
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{}{}", left_pad, line)
            }
        })
        .collect()
}

/// Remove the leading whitespace common to all non-blank lines.
///
/// Whitespace-only lines are ignored when finding the margin and come out empty.
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !is_blank(line))
        .map(leading_whitespace)
        .reduce(common_prefix);

    let margin = margin.unwrap_or("");
    text.lines()
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                &line[margin.len()..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Word-wrap one logical line.
///
/// Words are separated by ASCII whitespace only, so a no-break space keeps
/// its words together. Tabs expand to 8-column stops and the spacing between
/// words is kept; whitespace at a line break is dropped. Indentation is kept
/// on the first display line when the first word still fits after it.
///
/// Words wider than `width` are split into pieces. A single glyph wider than
/// `width` gets a line of its own.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let line = expand_tabs(line);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut has_words = false;

    for (gap, word) in chunks(&line) {
        for (i, piece) in split_long_word(word, width).into_iter().enumerate() {
            let gap_width = if i == 0 { gap.len() } else { 0 };
            let piece_width = display_width(piece);

            if !has_words {
                if gap_width + piece_width <= width {
                    current.push_str(&" ".repeat(gap_width));
                    current_width = gap_width;
                }
                current.push_str(piece);
                current_width += piece_width;
                has_words = true;
            } else if current_width + gap_width + piece_width <= width {
                current.push_str(&" ".repeat(gap_width));
                current.push_str(piece);
                current_width += gap_width + piece_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(piece);
                current_width = piece_width;
            }
        }
    }

    if has_words {
        lines.push(current);
    }
    lines
}

/// Columns `text` occupies on a terminal.
pub fn display_width(text: &str) -> usize {
    let mut width = 0;
    let mut rest = text;
    while !rest.is_empty() {
        let (len, unit_width) = next_unit(rest);
        width += unit_width;
        rest = &rest[len..];
    }
    width
}

/// Byte length and column width of the first unit of `text`: either a whole
/// CSI escape sequence or a single character.
fn next_unit(text: &str) -> (usize, usize) {
    if let Some(params) = text.strip_prefix("\x1b[") {
        let len = params
            .find(|c: char| ('\x40'..='\x7e').contains(&c))
            .map(|end| 2 + end + 1)
            .unwrap_or(text.len());
        return (len, 0);
    }
    match text.chars().next() {
        Some(ch) => (ch.len_utf8(), ch.width().unwrap_or(0)),
        None => (0, 0),
    }
}

/// Split a word into pieces no wider than `width` columns, never inside an
/// escape sequence.
fn split_long_word(word: &str, width: usize) -> Vec<&str> {
    if display_width(word) <= width {
        return vec![word];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut idx = 0;
    let mut piece_width = 0;
    while idx < word.len() {
        let (len, unit_width) = next_unit(&word[idx..]);
        if piece_width + unit_width > width && idx > start {
            pieces.push(&word[start..idx]);
            start = idx;
            piece_width = 0;
        }
        piece_width += unit_width;
        idx += len;
    }
    pieces.push(&word[start..]);
    pieces
}

/// Split a line into `(leading gap, word)` pairs. Trailing whitespace is dropped.
fn chunks(line: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut rest = line;
    loop {
        let word_start = rest
            .find(|c: char| !c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        let (gap, tail) = rest.split_at(word_start);
        if tail.is_empty() {
            return out;
        }
        let word_end = tail
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(tail.len());
        let (word, next) = tail.split_at(word_end);
        out.push((gap, word));
        rest = next;
    }
}

fn expand_tabs(line: &str) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            out.push_str(&" ".repeat(spaces));
            column += spaces;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    Cow::Owned(out)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn trim_blank_edges(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    let first = lines.iter().position(|l| !is_blank(l));
    let last = lines.iter().rposition(|l| !is_blank(l));
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].to_vec(),
        _ => Vec::new(),
    }
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start_matches(|c: char| c.is_ascii_whitespace()).len()]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, ca), cb)| ca == cb)
        .last()
        .map(|((idx, ca), _)| idx + ca.len_utf8())
        .unwrap_or(0);
    &a[..len]
}
