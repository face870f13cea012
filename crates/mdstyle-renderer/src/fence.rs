//! Code region tracking for line-based scanning.
//!
//! Block rules and inline rules must not fire inside code, so every line
//! scanner feeds its lines through a [`CodeTracker`] first.

/// Tracks fenced and indented code during line-by-line processing.
///
/// Code fences can use backticks or tildes (three or more). The closing
/// fence must use the same character and be at least as long as the opening
/// fence. Indented code starts with four columns of indentation after a
/// blank line, counted from the content column of the enclosing list item.
#[derive(Debug)]
pub(crate) struct CodeTracker {
    /// Character used for the current fence (backtick or tilde).
    fence_char: Option<char>,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
    /// Whether the previous line was blank (or there was none).
    after_blank: bool,
    /// Whether the previous line was indented code.
    in_indented: bool,
    /// Content columns of the open list items, innermost last.
    list_columns: Vec<usize>,
}

impl Default for CodeTracker {
    fn default() -> Self {
        Self {
            fence_char: None,
            fence_len: 0,
            after_blank: true,
            in_indented: false,
            list_columns: Vec::new(),
        }
    }
}

impl CodeTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Classify a line and advance the state.
    ///
    /// Returns `true` if the line belongs to code: a fence marker, a line
    /// inside a fence, or an indented code line.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let blank = trimmed.is_empty();
        let indent = indent_width(line);

        let is_code = if let Some(fence_char) = self.fence_char {
            if is_fence_line(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
            }
            true
        } else if self.starts_indented_code(line) {
            self.in_indented = true;
            true
        } else {
            let item = list_item_content_offset(trimmed);
            // A new item, or a paragraph left of an item's content column
            // after a blank line, closes the deeper items.
            if item.is_some() || (!blank && self.after_blank) {
                while self.list_columns.last().is_some_and(|&col| col > indent) {
                    self.list_columns.pop();
                }
            }
            if let Some(offset) = item {
                self.list_columns.push(indent + offset);
            }

            if let Some((ch, len)) = detect_fence(trimmed) {
                self.fence_char = Some(ch);
                self.fence_len = len;
                self.in_indented = false;
                true
            } else {
                // Blank lines inside indented code keep the block open.
                if !blank {
                    self.in_indented = false;
                }
                false
            }
        };

        self.after_blank = blank;
        is_code
    }

    /// Whether a block marker on `line` would be read as code.
    ///
    /// Does not advance the state.
    pub(crate) fn would_be_code(&self, line: &str) -> bool {
        self.in_fence() || self.starts_indented_code(line)
    }

    fn starts_indented_code(&self, line: &str) -> bool {
        if !(self.after_blank || self.in_indented) || line.trim().is_empty() {
            return false;
        }
        let indent = indent_width(line);
        let base = self
            .list_columns
            .iter()
            .rev()
            .find(|&&col| col <= indent)
            .copied()
            .unwrap_or(0);
        indent >= base + 4
    }
}

/// Offset of the content after a list item marker at the start of `trimmed`.
///
/// Recognizes `-`, `+` and `*` bullets and `1.` / `1)` ordered markers.
/// Thematic breaks such as `* * *` are not list items.
pub(crate) fn list_item_content_offset(trimmed: &str) -> Option<usize> {
    let marker = match trimmed.chars().next()? {
        '-' | '+' | '*' => 1,
        '0'..='9' => {
            let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
            if digits > 9 || !matches!(trimmed[digits..].chars().next(), Some('.' | ')')) {
                return None;
            }
            digits + 1
        }
        _ => return None,
    };
    let rest = &trimmed[marker..];
    if rest.is_empty() {
        return Some(marker + 1);
    }
    if !rest.starts_with([' ', '\t']) || is_thematic_break(trimmed) {
        return None;
    }
    let spaces = rest.chars().take_while(|&c| c == ' ').count();
    // Five or more spaces start indented code inside the item.
    Some(marker + if (1..=4).contains(&spaces) { spaces } else { 1 })
}

/// Whether `trimmed` is a thematic break (`***`, `- - -`, `___`).
pub(crate) fn is_thematic_break(trimmed: &str) -> bool {
    let Some(first) = trimmed.chars().next().filter(|c| matches!(c, '-' | '*' | '_')) else {
        return false;
    };
    trimmed.chars().all(|c| c == first || c == ' ' || c == '\t')
        && trimmed.chars().filter(|&c| c == first).count() >= 3
}

/// Width of leading whitespace, counting tabs as four columns.
fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => break,
        }
    }
    width
}

/// Detect if a line starts a code fence.
///
/// Returns the fence character and length if found.
fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let count = trimmed.chars().take_while(|&c| c == first).count();
    // Backtick fences cannot have backticks in the info string.
    if first == '`' && trimmed[count..].contains('`') {
        return None;
    }
    (count >= 3).then_some((first, count))
}

/// Check if a line is a valid closing fence.
fn is_fence_line(trimmed: &str, expected_char: char, min_len: usize) -> bool {
    let count = trimmed.chars().take_while(|&c| c == expected_char).count();
    count >= min_len && trimmed[count..].chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_fence() {
        let mut tracker = CodeTracker::new();

        assert!(tracker.update("```rust"));
        assert!(tracker.in_fence());
        assert!(tracker.update("!!! note inside"));
        assert!(tracker.update("```"));
        assert!(!tracker.in_fence());
        assert!(!tracker.update("after"));
    }

    #[test]
    fn test_tilde_fence_needs_same_char() {
        let mut tracker = CodeTracker::new();

        assert!(tracker.update("~~~"));
        assert!(tracker.update("```"));
        assert!(tracker.in_fence());
        assert!(tracker.update("~~~~"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_shorter_fence_not_closing() {
        let mut tracker = CodeTracker::new();

        assert!(tracker.update("````"));
        assert!(tracker.update("```"));
        assert!(tracker.in_fence());
        assert!(tracker.update("````"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_inline_code_is_not_fence() {
        let mut tracker = CodeTracker::new();
        assert!(!tracker.update("``inline code``"));
        assert!(!tracker.update("```a` b```"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_indented_code_after_blank() {
        let mut tracker = CodeTracker::new();

        assert!(!tracker.update("para"));
        // Lazy continuation, not code.
        assert!(!tracker.update("    still para"));
        assert!(!tracker.update(""));
        assert!(tracker.update("    code"));
        assert!(!tracker.update(""));
        assert!(tracker.update("    more code"));
        assert!(!tracker.update("back"));
    }

    #[test]
    fn test_would_be_code_does_not_advance() {
        let mut tracker = CodeTracker::new();
        tracker.update("");
        assert!(tracker.would_be_code("    !!! note"));
        assert!(!tracker.would_be_code("!!! note"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_list_continuation_is_not_code() {
        let mut tracker = CodeTracker::new();

        assert!(!tracker.update("- a"));
        assert!(!tracker.update(""));
        assert!(!tracker.update("    [漢字]{かんじ} and __u__"));
        assert!(!tracker.update(""));
        // Four columns past the item's content column.
        assert!(tracker.update("      code"));
    }

    #[test]
    fn test_list_closes_at_outdented_paragraph() {
        let mut tracker = CodeTracker::new();

        assert!(!tracker.update("1. first"));
        assert!(!tracker.update(""));
        assert!(!tracker.update("back to top level"));
        assert!(!tracker.update(""));
        assert!(tracker.update("    code"));
    }

    #[test]
    fn test_nested_list_columns() {
        let mut tracker = CodeTracker::new();

        assert!(!tracker.update("- outer"));
        assert!(!tracker.update("  - inner"));
        assert!(!tracker.update(""));
        assert!(!tracker.update("    inner paragraph"));
        assert!(!tracker.update(""));
        assert!(!tracker.update("  outer paragraph"));
        assert!(!tracker.update(""));
        assert!(tracker.update("      code in outer"));
    }

    #[test]
    fn test_list_item_content_offset() {
        assert_eq!(list_item_content_offset("- a"), Some(2));
        assert_eq!(list_item_content_offset("10. a"), Some(4));
        assert_eq!(list_item_content_offset("1)   a"), Some(5));
        assert_eq!(list_item_content_offset("-      a"), Some(2));
        assert_eq!(list_item_content_offset("-"), Some(2));
        assert_eq!(list_item_content_offset("-a"), None);
        assert_eq!(list_item_content_offset("* * *"), None);
        assert_eq!(list_item_content_offset("1234567890. a"), None);
        assert_eq!(list_item_content_offset("text"), None);
    }

    #[test]
    fn test_indent_width_tabs() {
        assert_eq!(indent_width("\tx"), 4);
        assert_eq!(indent_width("  \tx"), 4);
        assert_eq!(indent_width("   x"), 3);
    }
}
