//! Syntax highlighting for fenced code.
//!
//! Colors are written as inline `style` attributes so highlighted code keeps
//! its look when the HTML is pasted somewhere without the stylesheet.

use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Bundled color scheme used for all code blocks.
const THEME: &str = "InspiredGitHub";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_nonewlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Highlight `code` as `lang`, returning one HTML string per source line.
///
/// Returns `None` when no bundled grammar matches `lang`.
pub(crate) fn highlight_lines(lang: &str, code: &str) -> Option<Vec<String>> {
    let syntax = find_syntax(lang)?;
    let theme = THEMES.themes.get(THEME)?;
    let mut highlighter = HighlightLines::new(syntax, theme);

    let body = code.strip_suffix('\n').unwrap_or(code);
    let lines: Option<Vec<String>> = body
        .split('\n')
        .map(|line| {
            let regions = highlighter.highlight_line(line, &SYNTAXES).ok()?;
            styled_line_to_highlighted_html(&regions, IncludeBackground::No).ok()
        })
        .collect();
    if lines.is_none() {
        tracing::debug!(lang, "Highlighting failed, falling back to plain code");
    }
    lines
}

/// Grammar for a fence language, by extension or name.
fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    let lang = lang.to_ascii_lowercase();
    let token = match lang.as_str() {
        "shell" | "console" => "sh",
        "c++" => "cpp",
        "c#" | "csharp" => "cs",
        "golang" => "go",
        "py3" => "py",
        other => other,
    };
    SYNTAXES
        .find_syntax_by_token(token)
        .filter(|syntax| syntax.name != "Plain Text")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language() {
        let lines = highlight_lines("rust", "fn main() {}\nlet x = 1;\n").unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#"<span style=""#), "{}", lines[0]);
        assert!(lines[0].contains("color:#"));
        assert!(lines[0].contains("main"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let lines = highlight_lines("html", "<b>&</b>").unwrap();
        assert!(lines[0].contains("&lt;"));
        assert!(!lines[0].contains("<b>"));
    }

    #[test]
    fn test_aliases() {
        assert!(highlight_lines("JS", "let a;").is_some());
        assert!(highlight_lines("bash", "echo hi").is_some());
        assert!(highlight_lines("golang", "package main").is_some());
    }

    #[test]
    fn test_unknown_language() {
        assert!(highlight_lines("no-such-lang", "x").is_none());
        assert!(highlight_lines("txt", "x").is_none());
    }
}
