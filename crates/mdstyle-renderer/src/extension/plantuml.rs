//! `PlantUML` diagrams between `@startuml` and `@enduml`.
//!
//! Diagrams are not rendered locally: the source is percent-encoded into an
//! image URL on a `PlantUML` server.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::{BlockRule, RenderContext, RenderFault};
use crate::Lexer;
use crate::token::Token;
use crate::util::escape_html;

/// Characters left unencoded in diagram URLs (the URI component set).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// SVG image URL for a diagram on `server`.
///
/// # Example
///
/// ```
/// use mdstyle_renderer::extension::plantuml_url;
///
/// assert_eq!(
///     plantuml_url("https://www.plantuml.com/plantuml/", "A -> B"),
///     "https://www.plantuml.com/plantuml/svg/A%20-%3E%20B"
/// );
/// ```
pub fn plantuml_url(server: &str, source: &str) -> String {
    format!(
        "{}/svg/{}",
        server.trim_end_matches('/'),
        utf8_percent_encode(source, COMPONENT)
    )
}

/// HTML for a diagram image.
pub(crate) fn plantuml_image(server: &str, source: &str) -> String {
    format!(
        r#"<div class="plantuml-container"><img src="{}" alt="PlantUML diagram" class="plantuml" /></div>"#,
        escape_html(&plantuml_url(server, source))
    ) + "\n"
}

fn is_start(line: &str) -> bool {
    line.trim() == "@startuml"
}

fn is_end(line: &str) -> bool {
    line.trim() == "@enduml"
}

/// Block rule for `@startuml` ... `@enduml` diagrams.
///
/// An unterminated diagram is not a diagram; its lines render as text.
pub struct PlantUmlRule;

impl BlockRule for PlantUmlRule {
    fn name(&self) -> &str {
        "plantuml"
    }

    fn recognize(&self, line: &str) -> bool {
        is_start(line)
    }

    fn parse(&self, lines: &[&str], _lexer: &Lexer<'_>) -> Option<(Token, usize)> {
        if !is_start(lines.first()?) {
            return None;
        }
        // Diagram source is opaque, so code fences inside it do not count.
        let body = &lines[1..];
        let end = body.iter().position(|line| is_end(line))?;
        let consumed = end + 2;
        let content = body[..end].join("\n");
        let token = Token::extension("plantuml", self.name(), lines[..consumed].join("\n"))
            .with_attr("content", content.trim());
        Some((token, consumed))
    }

    fn render(&self, token: &Token, ctx: &mut RenderContext<'_>) -> Result<String, RenderFault> {
        let content = token
            .attr("content")
            .ok_or_else(|| RenderFault::new(self.name(), "missing diagram source"))?;
        Ok(plantuml_image(&ctx.config().plantuml_server, content))
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
        let lines = ["@startuml", "Alice -> Bob: Hi", "@enduml", "after"];

        let (token, consumed) = PlantUmlRule.parse(&lines, &lexer).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(token.attr("content"), Some("Alice -> Bob: Hi"));
    }

    #[test]
    fn test_unterminated_is_a_miss() {
        let registry = ExtensionRegistry::new();
        let lexer = Lexer::new(&registry);
        let lines = ["@startuml", "Alice -> Bob"];

        assert!(PlantUmlRule.parse(&lines, &lexer).is_none());
    }

    #[test]
    fn test_url_encoding() {
        assert_eq!(
            plantuml_url("https://example.com/plantuml", "a: (b)!\n"),
            "https://example.com/plantuml/svg/a%3A%20(b)!%0A"
        );
    }

    #[test]
    fn test_image_markup() {
        let html = plantuml_image("https://example.com", "A -> B");
        assert_eq!(
            html,
            "<div class=\"plantuml-container\"><img src=\"https://example.com/svg/A%20-%3E%20B\" \
             alt=\"PlantUML diagram\" class=\"plantuml\" /></div>\n"
        );
    }
}
