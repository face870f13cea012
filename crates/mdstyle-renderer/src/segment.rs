//! Inline content boundaries inside a markdown chunk.
//!
//! Inline rules see the inline content of one block at a time. A chunk is cut
//! at list item markers, headings, thematic breaks, blank lines and table
//! cell pipes, so no span runs from one list item or table cell into the
//! next. The cut-out block syntax passes through untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::fence::{is_thematic_break, list_item_content_offset};

static QUOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?: {0,3}>[ ]?)*").unwrap());

static ATX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}#{1,6}(?:[ \t]+|$)").unwrap());

static TABLE_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)*\|?[ \t]*$").unwrap()
});

/// A piece of a markdown chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Block syntax: list and heading markers, table pipes, blank lines.
    Markup(&'a str),
    /// Inline content of one block.
    Inline(&'a str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Line {
    Blank,
    Break,
    /// List item; the marker and its padding span this many bytes.
    Item(usize),
    /// ATX heading; the `#` run and its padding span this many bytes.
    Heading(usize),
    TableRow,
    TableDelimiter,
    Text,
}

/// Cut `text` into markup and per-block inline content.
///
/// Concatenating the segments gives back `text`.
pub(crate) fn segments(text: &str) -> Vec<Segment<'_>> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let kinds = classify_lines(&lines);
    let mut out = Vec::new();
    let mut inline_start: Option<usize> = None;
    let mut offset = 0;

    for (&line, kind) in lines.iter().zip(kinds) {
        let end = offset + line.len();
        match kind {
            Line::Text => {
                inline_start.get_or_insert(offset);
            }
            Line::Item(prefix) => {
                flush(text, &mut inline_start, offset, &mut out);
                out.push(Segment::Markup(&text[offset..offset + prefix]));
                inline_start = Some(offset + prefix);
            }
            Line::Heading(prefix) => {
                flush(text, &mut inline_start, offset, &mut out);
                out.push(Segment::Markup(&text[offset..offset + prefix]));
                if offset + prefix < end {
                    out.push(Segment::Inline(&text[offset + prefix..end]));
                }
            }
            Line::TableRow => {
                flush(text, &mut inline_start, offset, &mut out);
                split_cells(line, &mut out);
            }
            Line::Blank | Line::Break | Line::TableDelimiter => {
                flush(text, &mut inline_start, offset, &mut out);
                out.push(Segment::Markup(line));
            }
        }
        offset = end;
    }
    flush(text, &mut inline_start, text.len(), &mut out);
    out
}

fn flush<'a>(text: &'a str, start: &mut Option<usize>, end: usize, out: &mut Vec<Segment<'a>>) {
    if let Some(start) = start.take()
        && start < end
    {
        out.push(Segment::Inline(&text[start..end]));
    }
}

fn classify_lines(lines: &[&str]) -> Vec<Line> {
    let mut kinds: Vec<Line> = lines.iter().map(|&line| classify(line)).collect();

    let mut i = 1;
    while i < lines.len() {
        let is_table = kinds[i] == Line::Text
            && kinds[i - 1] == Line::Text
            && lines[i].contains('|')
            && lines[i - 1].contains('|')
            && TABLE_DELIMITER.is_match(line_body(lines[i]));
        if !is_table {
            i += 1;
            continue;
        }
        kinds[i - 1] = Line::TableRow;
        kinds[i] = Line::TableDelimiter;
        i += 1;
        while i < lines.len() && kinds[i] == Line::Text {
            kinds[i] = Line::TableRow;
            i += 1;
        }
    }
    kinds
}

fn classify(line: &str) -> Line {
    let body = line_body(line);
    let quote = QUOTE_PREFIX.find(body).map_or(0, |m| m.end());
    let rest = &body[quote..];
    let trimmed = rest.trim_start();

    if trimmed.is_empty() {
        return Line::Blank;
    }
    if is_thematic_break(trimmed) {
        return Line::Break;
    }
    if let Some(m) = ATX_HEADING.find(rest) {
        return Line::Heading(quote + m.end());
    }
    match list_item_content_offset(trimmed) {
        Some(offset) => {
            let indent = rest.len() - trimmed.len();
            Line::Item(quote + indent + offset.min(trimmed.len()))
        }
        None => Line::Text,
    }
}

fn line_body(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Split a table row at unescaped pipes.
fn split_cells<'a>(row: &'a str, out: &mut Vec<Segment<'a>>) {
    let mut cell_start = 0;
    let mut chars = row.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '|' => {
                if cell_start < i {
                    out.push(Segment::Inline(&row[cell_start..i]));
                }
                out.push(Segment::Markup(&row[i..=i]));
                cell_start = i + 1;
            }
            _ => {}
        }
    }
    if cell_start < row.len() {
        out.push(Segment::Inline(&row[cell_start..]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use Segment::{Inline, Markup};

    fn joined(segments: &[Segment<'_>]) -> String {
        segments
            .iter()
            .map(|s| match s {
                Markup(s) | Inline(s) => *s,
            })
            .collect()
    }

    #[test]
    fn test_paragraph_is_one_segment() {
        let text = "first *line\nsecond* line";
        assert_eq!(segments(text), vec![Inline(text)]);
    }

    #[test]
    fn test_list_items_are_separate() {
        let text = "- item *one\n- item two*";
        assert_eq!(
            segments(text),
            vec![
                Markup("- "),
                Inline("item *one\n"),
                Markup("- "),
                Inline("item two*")
            ]
        );
    }

    #[test]
    fn test_item_keeps_continuation_lines() {
        let text = "1. a *b\n   c* d\n2. e";
        assert_eq!(
            segments(text),
            vec![
                Markup("1. "),
                Inline("a *b\n   c* d\n"),
                Markup("2. "),
                Inline("e")
            ]
        );
    }

    #[test]
    fn test_table_cells_are_separate() {
        let text = "| **a | b** |\n|---|---|\n| c \\| d | e |";
        let segments = segments(text);

        assert_eq!(
            segments,
            vec![
                Markup("|"),
                Inline(" **a "),
                Markup("|"),
                Inline(" b** "),
                Markup("|"),
                Inline("\n"),
                Markup("|---|---|\n"),
                Markup("|"),
                Inline(" c \\| d "),
                Markup("|"),
                Inline(" e "),
                Markup("|"),
            ]
        );
        assert_eq!(joined(&segments), text);
    }

    #[test]
    fn test_pipe_without_delimiter_row_is_text() {
        let text = "a | *b\nc | d*";
        assert_eq!(segments(text), vec![Inline(text)]);
    }

    #[test]
    fn test_heading_and_break() {
        let text = "# Title *a\ntext a*\n\n***\nmore";
        let segments = segments(text);

        assert_eq!(
            segments,
            vec![
                Markup("# "),
                Inline("Title *a\n"),
                Inline("text a*\n"),
                Markup("\n"),
                Markup("***\n"),
                Inline("more")
            ]
        );
        assert_eq!(joined(&segments), text);
    }

    #[test]
    fn test_quoted_list_item() {
        let text = "> - a\n> - b";
        assert_eq!(
            segments(text),
            vec![Markup("> - "), Inline("a\n"), Markup("> - "), Inline("b")]
        );
    }
}
