//! Delimiter-run emphasis (`***strong***`, `*em*`, `__underline__`,
//! `~~strike~~`).

use super::{InlineRule, RenderContext, RenderFault};
use crate::Lexer;
use crate::token::Token;

/// Inline rule wrapping text between matching delimiter runs in an HTML tag.
///
/// A span opens at a run of exactly one of the configured lengths followed by
/// non-whitespace, and closes at the next run of the same length preceded by
/// non-whitespace. Spans never cross a blank line. Runs are maximal, so
/// `***` is never read as `**` plus `*`.
///
/// # Example
///
/// ```
/// use mdstyle_renderer::extension::{DelimiterRule, ExtensionRegistry};
/// use mdstyle_renderer::{Engine, RenderConfig};
///
/// let registry = ExtensionRegistry::new()
///     .with_inline(DelimiterRule::new("highlight", "mark", '=', &[2]));
/// let html = Engine::new(registry, Default::default())
///     .render("a ==marked== word", &RenderConfig::default());
/// assert!(html.contains("<mark>marked</mark>"));
/// ```
#[derive(Clone, Debug)]
pub struct DelimiterRule {
    name: String,
    tag: String,
    delimiter: char,
    lengths: Vec<usize>,
    intraword: bool,
}

impl DelimiterRule {
    /// Create a rule named `name` rendering `<tag>` for runs of `delimiter`
    /// with one of the given `lengths`.
    pub fn new(name: &str, tag: &str, delimiter: char, lengths: &[usize]) -> Self {
        Self {
            name: name.to_owned(),
            tag: tag.to_owned(),
            delimiter,
            lengths: lengths.to_vec(),
            intraword: true,
        }
    }

    /// Whether spans may open or close inside a word (default `true`).
    #[must_use]
    pub fn intraword(mut self, allowed: bool) -> Self {
        self.intraword = allowed;
        self
    }

    fn run_length(&self, s: &str) -> usize {
        s.chars().take_while(|&c| c == self.delimiter).count()
    }
}

impl InlineRule for DelimiterRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self, src: &str) -> Option<usize> {
        let width = self.delimiter.len_utf8();
        let mut pos = 0;
        let mut prev: Option<char> = None;

        while let Some(c) = src[pos..].chars().next() {
            if c != self.delimiter {
                prev = Some(c);
                pos += c.len_utf8();
                continue;
            }
            let run = self.run_length(&src[pos..]);
            let end = pos + run * width;
            let after = src[end..].chars().next();
            if self.lengths.contains(&run)
                && after.is_some_and(|a| !a.is_whitespace())
                && (self.intraword || !prev.is_some_and(char::is_alphanumeric))
            {
                return Some(pos);
            }
            prev = Some(self.delimiter);
            pos = end;
        }
        None
    }

    fn parse(&self, src: &str, lexer: &Lexer<'_>) -> Option<Token> {
        let width = self.delimiter.len_utf8();
        let open = self.run_length(src);
        if !self.lengths.contains(&open) {
            return None;
        }
        let body_start = open * width;
        if src[body_start..].chars().next().is_none_or(char::is_whitespace) {
            return None;
        }

        let mut pos = body_start;
        let mut prev: Option<char> = None;
        while let Some(c) = src[pos..].chars().next() {
            if c != self.delimiter {
                prev = Some(c);
                pos += c.len_utf8();
                continue;
            }
            let run = self.run_length(&src[pos..]);
            let end = pos + run * width;
            let after = src[end..].chars().next();
            if run == open
                && prev.is_some_and(|p| !p.is_whitespace())
                && (self.intraword || !after.is_some_and(char::is_alphanumeric))
            {
                let content = &src[body_start..pos];
                if content.split('\n').any(|line| line.trim().is_empty()) {
                    return None;
                }
                return Some(
                    Token::extension(&self.name, &self.name, &src[..end])
                        .with_children(lexer.inline(content)),
                );
            }
            prev = Some(self.delimiter);
            pos = end;
        }
        None
    }

    fn render(&self, token: &Token, ctx: &mut RenderContext<'_>) -> Result<String, RenderFault> {
        let inner = ctx.render_inline(&token.children);
        Ok(format!("<{tag}>{inner}</{tag}>", tag = self.tag))
    }
}
