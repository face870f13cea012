//! Ruby annotations: `[漢字]{かんじ}`.

use std::sync::LazyLock;

use regex::Regex;

use super::{InlineRule, RenderContext, RenderFault};
use crate::Lexer;
use crate::token::Token;

static RUBY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]\n]+)\]\{([^}\n]+)\}").unwrap());

/// Inline rule rendering `[base]{annotation}` as `<ruby>`.
pub struct RubyRule;

impl InlineRule for RubyRule {
    fn name(&self) -> &str {
        "ruby"
    }

    fn start(&self, src: &str) -> Option<usize> {
        src.find('[')
    }

    fn parse(&self, src: &str, lexer: &Lexer<'_>) -> Option<Token> {
        let caps = RUBY.captures(src)?;
        Some(
            Token::extension("ruby", self.name(), &caps[0])
                .with_attr("ruby", &caps[2])
                .with_children(lexer.inline(&caps[1])),
        )
    }

    fn render(&self, token: &Token, ctx: &mut RenderContext<'_>) -> Result<String, RenderFault> {
        let ruby = token
            .attr("ruby")
            .ok_or_else(|| RenderFault::new(self.name(), "missing annotation"))?;
        let base = ctx.render_inline(&token.children);
        Ok(format!("<ruby>{base}<rt>{ruby}</rt></ruby>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::ExtensionRegistry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        let registry = ExtensionRegistry::new();
        let lexer = Lexer::new(&registry);

        let token = RubyRule.parse("[漢字]{かんじ} after", &lexer).unwrap();
        assert_eq!(token.raw, "[漢字]{かんじ}");
        assert_eq!(token.attr("ruby"), Some("かんじ"));
        assert_eq!(token.children[0].raw, "漢字");
    }

    #[test]
    fn test_links_are_not_ruby() {
        let registry = ExtensionRegistry::new();
        let lexer = Lexer::new(&registry);

        assert!(RubyRule.parse("[text](https://example.com)", &lexer).is_none());
        assert!(RubyRule.parse("[a]{}", &lexer).is_none());
        assert!(RubyRule.parse("[]{b}", &lexer).is_none());
    }
}
