//! `[[toc]]` table of contents.
//!
//! Headings after the marker are not known when it renders, so the rule
//! emits a placeholder that the engine replaces with [`render_toc`] once the
//! whole document has been rendered.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use super::{BlockRule, RenderContext, RenderFault};
use crate::Lexer;
use crate::state::TocEntry;
use crate::token::Token;
use crate::util::escape_html;

/// Marker left in the HTML where the table of contents goes.
///
/// Built from private-use characters, so markup written in the document
/// (such as an HTML comment) is never mistaken for it.
pub const TOC_PLACEHOLDER: &str = "\u{E010}toc\u{E011}";

static TOC_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[\[toc\]\]\s*$").unwrap());

/// Block rule for the `[[toc]]` marker line.
pub struct TocRule;

impl BlockRule for TocRule {
    fn name(&self) -> &str {
        "toc"
    }

    fn recognize(&self, line: &str) -> bool {
        TOC_MARKER.is_match(line)
    }

    fn parse(&self, lines: &[&str], _lexer: &Lexer<'_>) -> Option<(Token, usize)> {
        let line = lines.first()?;
        TOC_MARKER
            .is_match(line)
            .then(|| (Token::extension("toc", self.name(), *line), 1))
    }

    fn render(&self, _token: &Token, _ctx: &mut RenderContext<'_>) -> Result<String, RenderFault> {
        Ok(format!("{TOC_PLACEHOLDER}\n"))
    }
}

/// Render a heading index.
///
/// # Example
///
/// ```
/// use mdstyle_renderer::TocEntry;
/// use mdstyle_renderer::extension::render_toc;
///
/// let html = render_toc(&[TocEntry::new(2, "Usage", "usage")], "Contents");
/// assert!(html.contains(r##"<a class="toc-link" href="#usage">Usage</a>"##));
/// ```
pub fn render_toc(entries: &[TocEntry], title: &str) -> String {
    let mut html = String::from(r#"<nav class="toc-container">"#);
    if !title.is_empty() {
        write!(html, r#"<div class="toc-title">{}</div>"#, escape_html(title)).unwrap();
    }
    html.push_str(r#"<ul class="toc-list">"#);
    for entry in entries {
        write!(
            html,
            r##"<li class="toc-item toc-level-{}"><a class="toc-link" href="#{}">{}</a></li>"##,
            entry.level,
            escape_html(&entry.id),
            escape_html(&entry.title)
        )
        .unwrap();
    }
    html.push_str("</ul></nav>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recognize_case_insensitive() {
        assert!(TocRule.recognize("[[toc]]"));
        assert!(TocRule.recognize("[[TOC]]  "));
        assert!(!TocRule.recognize("see [[toc]]"));
        assert!(!TocRule.recognize("[[toc]] here"));
    }

    #[test]
    fn test_render_toc() {
        let entries = vec![
            TocEntry::new(1, "Intro", "intro"),
            TocEntry::new(2, "A & B", "a-b"),
        ];
        assert_eq!(
            render_toc(&entries, "Contents"),
            "<nav class=\"toc-container\"><div class=\"toc-title\">Contents</div>\
             <ul class=\"toc-list\">\
             <li class=\"toc-item toc-level-1\"><a class=\"toc-link\" href=\"#intro\">Intro</a></li>\
             <li class=\"toc-item toc-level-2\"><a class=\"toc-link\" href=\"#a-b\">A &amp; B</a></li>\
             </ul></nav>"
        );
    }

    #[test]
    fn test_render_toc_without_title() {
        assert_eq!(
            render_toc(&[], ""),
            "<nav class=\"toc-container\"><ul class=\"toc-list\"></ul></nav>"
        );
    }
}
