//! Footnotes.
//!
//! References (`[^id]`) link to definitions (`[^id]: text`). Consecutive
//! definitions are collected into one ordered list. Dangling references are
//! rendered as links anyway.

use std::sync::LazyLock;

use regex::Regex;

use super::{BlockRule, InlineRule, RenderContext, RenderFault};
use crate::Lexer;
use crate::scan::{LineClass, scan_extent};
use crate::token::Token;
use crate::util::escape_html;

static DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\^(\w+)\]:(?:\s+|$)").unwrap());

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[\^(\w+)\]").unwrap());

/// Block rule for `[^id]: text` footnote definitions.
pub struct FootnoteDefinitionRule;

impl BlockRule for FootnoteDefinitionRule {
    fn name(&self) -> &str {
        "footnoteDefinition"
    }

    fn recognize(&self, line: &str) -> bool {
        DEFINITION.is_match(line)
    }

    fn parse(&self, lines: &[&str], lexer: &Lexer<'_>) -> Option<(Token, usize)> {
        let first = lines.first()?;
        let caps = DEFINITION.captures(first)?;
        let id = caps[1].to_owned();
        let rest = &first[caps[0].len()..];

        let extent = scan_extent(&lines[1..], |line| {
            if DEFINITION.is_match(line) {
                LineClass::Boundary
            } else {
                LineClass::Body
            }
        });
        let consumed = 1 + extent.consumed;

        let mut body = String::from(rest);
        for line in &lines[1..consumed] {
            body.push('\n');
            body.push_str(line);
        }

        let token = Token::extension("footnoteDefinition", self.name(), lines[..consumed].join("\n"))
            .with_attr("id", id)
            .with_children(lexer.blocks(body.trim()));
        Some((token, consumed))
    }

    fn render(&self, token: &Token, ctx: &mut RenderContext<'_>) -> Result<String, RenderFault> {
        let id = token
            .attr("id")
            .ok_or_else(|| RenderFault::new(self.name(), "missing footnote id"))?;
        Ok(format!(
            r#"<li id="footnote-{}" class="footnote-item">{}</li>"#,
            escape_html(id),
            ctx.render_blocks(&token.children).trim_end()
        ) + "\n")
    }

    fn group(&self) -> Option<(&'static str, &'static str)> {
        Some(("<ol class=\"footnotes\">\n", "</ol>\n"))
    }
}

/// Inline rule for `[^id]` footnote references.
pub struct FootnoteReferenceRule;

impl InlineRule for FootnoteReferenceRule {
    fn name(&self) -> &str {
        "footnoteReference"
    }

    fn start(&self, src: &str) -> Option<usize> {
        src.find("[^")
    }

    fn parse(&self, src: &str, _lexer: &Lexer<'_>) -> Option<Token> {
        let caps = REFERENCE.captures(src)?;
        Some(
            Token::extension("footnoteReference", self.name(), &caps[0])
                .with_attr("id", &caps[1]),
        )
    }

    fn render(&self, token: &Token, _ctx: &mut RenderContext<'_>) -> Result<String, RenderFault> {
        let id = token
            .attr("id")
            .ok_or_else(|| RenderFault::new(self.name(), "missing footnote id"))?;
        let id = escape_html(id);
        Ok(format!(
            r##"<sup class="footnote-ref"><a href="#footnote-{id}">{id}</a></sup>"##
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::ExtensionRegistry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_definition_body_runs_to_next_definition() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);
        let lines = ["[^1]: First note", "continues here", "[^2]: Second"];

        let (token, consumed) = FootnoteDefinitionRule.parse(&lines, &lexer).unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(token.attr("id"), Some("1"));
        assert_eq!(token.children[0].raw, "First note\ncontinues here");

        let (token, consumed) = FootnoteDefinitionRule.parse(&lines[2..], &lexer).unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(token.attr("id"), Some("2"));
    }

    #[test]
    fn test_definition_requires_space_or_end() {
        assert!(FootnoteDefinitionRule.recognize("[^a]: text"));
        assert!(FootnoteDefinitionRule.recognize("[^a]:"));
        assert!(!FootnoteDefinitionRule.recognize("[^a]:text"));
        assert!(!FootnoteDefinitionRule.recognize("[^a] text"));
    }

    #[test]
    fn test_reference_parse() {
        let registry = ExtensionRegistry::new();
        let lexer = Lexer::new(&registry);

        assert_eq!(FootnoteReferenceRule.start("see [^note] here"), Some(4));
        let token = FootnoteReferenceRule.parse("[^note] here", &lexer).unwrap();
        assert_eq!(token.raw, "[^note]");
        assert_eq!(token.attr("id"), Some("note"));
        assert!(FootnoteReferenceRule.parse("[^] x", &lexer).is_none());
    }
}
