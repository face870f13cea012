//! Alert boxes.
//!
//! ```text
//! !!! warning Check your input
//! Body is regular **markdown**.
//! !!!
//! ```
//!
//! The body runs to a bare `!!!` line, the next `!!! <kind>` line, or the end
//! of input.

use std::sync::LazyLock;

use regex::Regex;

use super::{BlockRule, RenderContext, RenderFault};
use crate::Lexer;
use crate::scan::{LineClass, scan_extent};
use crate::token::Token;
use crate::util::escape_html;

static ALERT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*!!!\s*([\w-]+)\s*(.*?)\s*$").unwrap());

/// Block rule for `!!! <kind> [<title>]` alert boxes.
pub struct AlertRule;

impl AlertRule {
    fn classify(line: &str) -> LineClass {
        if line.trim() == "!!!" {
            LineClass::Close
        } else if ALERT_OPEN.is_match(line) {
            LineClass::Boundary
        } else {
            LineClass::Body
        }
    }
}

impl BlockRule for AlertRule {
    fn name(&self) -> &str {
        "alert"
    }

    fn recognize(&self, line: &str) -> bool {
        ALERT_OPEN.is_match(line)
    }

    fn parse(&self, lines: &[&str], lexer: &Lexer<'_>) -> Option<(Token, usize)> {
        let caps = ALERT_OPEN.captures(lines.first()?)?;
        let kind = caps[1].to_owned();
        let title = caps[2].to_owned();

        let extent = scan_extent(&lines[1..], Self::classify);
        let body = lines[1..=extent.body_lines].join("\n");
        let consumed = 1 + extent.consumed;

        let token = Token::extension("alert", self.name(), lines[..consumed].join("\n"))
            .with_attr("alertType", kind)
            .with_attr("title", title)
            .with_children(lexer.blocks(body.trim()));
        Some((token, consumed))
    }

    fn render(&self, token: &Token, ctx: &mut RenderContext<'_>) -> Result<String, RenderFault> {
        let kind = token
            .attr("alertType")
            .ok_or_else(|| RenderFault::new(self.name(), "missing alert type"))?;
        let mut html = format!(r#"<div class="alert alert-{}">"#, escape_html(kind));
        if let Some(title) = token.attr("title").filter(|t| !t.is_empty()) {
            html.push_str(&format!(
                r#"<div class="alert-title">{}</div>"#,
                escape_html(title)
            ));
        }
        html.push_str(&ctx.render_blocks(&token.children));
        html.push_str("</div>\n");
        Ok(html)
    }
}
