//! Slide decks separated by `|||` lines.
//!
//! The first `|||` opens the deck, which runs to the end of the document.
//! Empty sections are dropped.

use super::{BlockRule, RenderContext, RenderFault};
use crate::Lexer;
use crate::scan::{LineClass, Terminator, scan_extent};
use crate::token::{Token, TokenKind};

fn is_separator(line: &str) -> bool {
    line.trim() == "|||"
}

/// Block rule for `|||`-separated slide decks.
pub struct SliderRule;

impl BlockRule for SliderRule {
    fn name(&self) -> &str {
        "slider"
    }

    fn recognize(&self, line: &str) -> bool {
        is_separator(line)
    }

    fn parse(&self, lines: &[&str], lexer: &Lexer<'_>) -> Option<(Token, usize)> {
        if !is_separator(lines.first()?) {
            return None;
        }

        let mut items = Vec::new();
        let mut pos = 1;
        loop {
            let extent = scan_extent(&lines[pos..], |line| {
                if is_separator(line) {
                    LineClass::Close
                } else {
                    LineClass::Body
                }
            });
            let section = lines[pos..pos + extent.body_lines].join("\n");
            let section = section.trim();
            if !section.is_empty() {
                items.push(
                    Token::new(TokenKind::Extension("sliderItem".to_owned()), section)
                        .with_children(lexer.blocks(section)),
                );
            }
            pos += extent.consumed;
            if extent.terminator == Terminator::EndOfInput {
                break;
            }
        }

        let token =
            Token::extension("slider", self.name(), lines.join("\n")).with_children(items);
        Some((token, lines.len()))
    }

    fn render(&self, token: &Token, ctx: &mut RenderContext<'_>) -> Result<String, RenderFault> {
        let mut html = String::from("<div class=\"slider-container\">\n");
        for item in &token.children {
            html.push_str("<div class=\"slider-item\">");
            html.push_str(&ctx.render_blocks(&item.children));
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::ExtensionRegistry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sections_and_empty_items_dropped() {
        let registry = ExtensionRegistry::new();
        let lexer = Lexer::new(&registry);
        let lines = ["|||", "one", "|||", "", "|||", "two", "more"];

        let (token, consumed) = SliderRule.parse(&lines, &lexer).unwrap();
        assert_eq!(consumed, 7);
        let items: Vec<_> = token.children.iter().map(|t| t.raw.as_str()).collect();
        assert_eq!(items, vec!["one", "two\nmore"]);
    }

    #[test]
    fn test_separator_inside_fence() {
        let registry = ExtensionRegistry::new();
        let lexer = Lexer::new(&registry);
        let lines = ["|||", "```", "|||", "```"];

        let (token, _) = SliderRule.parse(&lines, &lexer).unwrap();
        assert_eq!(token.children.len(), 1);
        assert_eq!(token.children[0].raw, "```\n|||\n```");
    }
}
