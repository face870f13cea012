//! Render-time context handed to extension rules.

use std::panic::{self, AssertUnwindSafe};

use super::{BlockRule, ExtensionRegistry, InlineRule, RenderFault};
use crate::config::RenderConfig;
use crate::renderer::MarkdownRenderer;
use crate::token::{Token, TokenKind};
use crate::util::{escape_html, escape_markdown, panic_message};

/// Context for rendering one token tree.
///
/// Gives rules access to the render configuration and lets them render
/// nested tokens (alert bodies, slide sections, inline children) through the
/// same pipeline as top-level content.
///
/// A failing rule never aborts the pass: its token is replaced by its raw
/// source, escaped, and the fault is logged and recorded as a warning.
pub struct RenderContext<'a> {
    registry: &'a ExtensionRegistry,
    config: &'a RenderConfig,
    markdown: &'a mut MarkdownRenderer,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        registry: &'a ExtensionRegistry,
        config: &'a RenderConfig,
        markdown: &'a mut MarkdownRenderer,
    ) -> Self {
        Self {
            registry,
            config,
            markdown,
        }
    }

    /// Render configuration for this pass.
    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Render block-level tokens to HTML.
    pub fn render_blocks(&mut self, tokens: &[Token]) -> String {
        let registry = self.registry;
        let mut html = String::new();
        // (rule name, closing markup) of the group currently open
        let mut open_group: Option<(&str, &'static str)> = None;

        for token in tokens {
            let rule = match token.kind {
                TokenKind::Extension(_) => token.rule.as_deref().and_then(|n| registry.block(n)),
                _ => None,
            };
            let group = rule.and_then(|r| r.group().map(|g| (r.name(), g)));

            if let Some((name, close)) = open_group
                && group.is_none_or(|(n, _)| n != name)
            {
                html.push_str(close);
                open_group = None;
            }
            if open_group.is_none()
                && let Some((name, (open, close))) = group
            {
                html.push_str(open);
                open_group = Some((name, close));
            }

            match (&token.kind, rule) {
                (TokenKind::Extension(_), Some(rule)) => {
                    html.push_str(&self.render_block_token(rule, token));
                }
                (TokenKind::Extension(kind), None) => {
                    let fault = RenderFault::new(
                        token.rule.as_deref().unwrap_or(kind),
                        "no block rule registered",
                    );
                    html.push_str(&self.block_fault(token, &fault.to_string()));
                }
                _ => html.push_str(&self.render_markdown(token)),
            }
        }

        if let Some((_, close)) = open_group {
            html.push_str(close);
        }
        html
    }

    /// Render inline tokens back to markdown with inline HTML.
    ///
    /// Text and code pass through unchanged; extension tokens become the HTML
    /// their rule produces.
    pub fn render_inline(&mut self, tokens: &[Token]) -> String {
        let registry = self.registry;
        let mut out = String::new();

        for token in tokens {
            match &token.kind {
                TokenKind::Extension(kind) => {
                    match token.rule.as_deref().and_then(|n| registry.inline(n)) {
                        Some(rule) => out.push_str(&self.render_inline_token(rule, token)),
                        None => {
                            let fault = RenderFault::new(
                                token.rule.as_deref().unwrap_or(kind),
                                "no inline rule registered",
                            );
                            self.record_fault(&fault.to_string());
                            out.push_str(&escape_markdown(&token.raw));
                        }
                    }
                }
                TokenKind::Markdown | TokenKind::Text | TokenKind::Verbatim => {
                    out.push_str(&token.raw);
                }
            }
        }

        out
    }

    /// Render a markdown chunk through the `CommonMark` grammar.
    fn render_markdown(&mut self, token: &Token) -> String {
        let source = if token.children.is_empty() {
            token.raw.clone()
        } else {
            self.render_inline(&token.children)
        };
        self.markdown.render_chunk(&source)
    }

    fn render_block_token(&mut self, rule: &dyn BlockRule, token: &Token) -> String {
        match panic::catch_unwind(AssertUnwindSafe(|| rule.render(token, self))) {
            Ok(Ok(html)) => html,
            Ok(Err(fault)) => self.block_fault(token, &fault.to_string()),
            Err(payload) => {
                let fault = RenderFault::new(rule.name(), panic_message(&*payload));
                self.block_fault(token, &fault.to_string())
            }
        }
    }

    fn render_inline_token(&mut self, rule: &dyn InlineRule, token: &Token) -> String {
        let message = match panic::catch_unwind(AssertUnwindSafe(|| rule.render(token, self))) {
            Ok(Ok(html)) => return html,
            Ok(Err(fault)) => fault.to_string(),
            Err(payload) => RenderFault::new(rule.name(), panic_message(&*payload)).to_string(),
        };
        self.record_fault(&message);
        escape_markdown(&token.raw)
    }

    fn block_fault(&mut self, token: &Token, message: &str) -> String {
        self.record_fault(message);
        format!(
            "<pre class=\"render-fault\">{}</pre>\n",
            escape_html(&token.raw)
        )
    }

    fn record_fault(&mut self, message: &str) {
        tracing::warn!(fault = message, "Extension render failed");
        self.markdown.warn(format!("Extension render failed: {message}"));
    }
}
