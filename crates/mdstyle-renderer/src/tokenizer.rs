//! Tokenizer: splits a document into extension tokens and markdown chunks.
//!
//! # Blocks
//!
//! Lines are scanned top to bottom. At each line outside code, block rules
//! are tried in registration order and the first successful parse consumes
//! its lines. Other lines accumulate into a markdown token.
//!
//! # Inline
//!
//! Inside a markdown token, code lines become verbatim tokens. The rest is
//! cut into per-block inline content (list items, headings, table cells) and
//! split by inline rules. Spans that markdown treats as opaque (code spans,
//! math, backslash escapes, autolinks, raw HTML tags, link destinations) are
//! swapped for private-use placeholders first so inline rules cannot match
//! inside them, then restored in the finished tokens.

use std::sync::LazyLock;

use regex::Regex;

use crate::extension::ExtensionRegistry;
use crate::fence::CodeTracker;
use crate::segment::{Segment, segments};
use crate::token::{Token, TokenKind};

const STASH_OPEN: char = '\u{E000}';
const STASH_CLOSE: char = '\u{E001}';

static STASH_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}(\\d+)\u{E001}").unwrap());

/// Autolinks, HTML comments and raw HTML tags.
static HTML_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^<(?:[A-Za-z][A-Za-z0-9+.\-]{1,31}:[^\s<>]*|[^\s<>@]+@[^\s<>@]+|!--[\s\S]*?-->|/?[A-Za-z][A-Za-z0-9\-]*(?:\s[^<>]*)?/?)>",
    )
    .unwrap()
});

/// Splits documents into tokens using the rules of an [`ExtensionRegistry`].
pub struct Lexer<'r> {
    registry: &'r ExtensionRegistry,
}

impl<'r> Lexer<'r> {
    /// Create a lexer for `registry`.
    pub fn new(registry: &'r ExtensionRegistry) -> Self {
        Self { registry }
    }

    /// Tokenize a whole document.
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        self.blocks(source)
    }

    /// Tokenize block-level content (a document or a block body).
    pub fn blocks(&self, source: &str) -> Vec<Token> {
        let lines: Vec<&str> = source.lines().collect();
        let mut tokens = Vec::new();
        let mut pending: Vec<&str> = Vec::new();
        let mut code = CodeTracker::new();
        let mut i = 0;

        while i < lines.len() {
            if !code.would_be_code(lines[i])
                && let Some((token, consumed)) = self.parse_block(&lines[i..])
            {
                self.flush(&mut pending, &mut tokens);
                tokens.push(token);
                i += consumed.max(1);
                code = CodeTracker::new();
                continue;
            }
            code.update(lines[i]);
            pending.push(lines[i]);
            i += 1;
        }

        self.flush(&mut pending, &mut tokens);
        tokens
    }

    fn parse_block(&self, lines: &[&str]) -> Option<(Token, usize)> {
        for rule in self.registry.block_rules() {
            if !rule.recognize(lines[0]) {
                continue;
            }
            if let Some((mut token, consumed)) = rule.parse(lines, self) {
                token.rule = Some(rule.name().to_owned());
                return Some((token, consumed));
            }
            tracing::trace!(rule = rule.name(), line = lines[0], "Block rule did not match");
        }
        None
    }

    /// Turn accumulated lines into a markdown token.
    fn flush(&self, pending: &mut Vec<&str>, tokens: &mut Vec<Token>) {
        if pending.is_empty() {
            return;
        }
        let raw = pending.join("\n");
        let children = self.markdown_children(pending);
        pending.clear();
        if raw.trim().is_empty() {
            return;
        }
        tokens.push(Token::new(TokenKind::Markdown, raw).with_children(children));
    }

    /// Split markdown lines into verbatim code runs and inline-lexed text.
    fn markdown_children(&self, lines: &[&str]) -> Vec<Token> {
        let mut children = Vec::new();
        let mut code = CodeTracker::new();
        let mut run = String::new();
        let mut run_is_code = false;

        for (i, line) in lines.iter().enumerate() {
            let is_code = code.update(line);
            if i > 0 && is_code != run_is_code {
                self.push_run(&mut children, std::mem::take(&mut run), run_is_code);
            }
            run_is_code = is_code;
            run.push_str(line);
            if i + 1 < lines.len() {
                run.push('\n');
            }
        }
        self.push_run(&mut children, run, run_is_code);
        children
    }

    fn push_run(&self, children: &mut Vec<Token>, run: String, is_code: bool) {
        if run.is_empty() {
            return;
        }
        if is_code {
            children.push(Token::verbatim(run));
            return;
        }
        for segment in segments(&run) {
            match segment {
                Segment::Markup(markup) => children.push(Token::text(markup)),
                Segment::Inline(text) => children.extend(self.inline_tokens(text)),
            }
        }
    }

    /// Tokenize inline text, protecting markdown's opaque spans.
    pub fn inline_tokens(&self, text: &str) -> Vec<Token> {
        if !self.registry.has_inline_rules() || text.contains([STASH_OPEN, STASH_CLOSE]) {
            return vec![Token::text(text)];
        }
        let stash = Stash::protect(text);
        let mut tokens = self.inline(stash.text());
        if !stash.is_empty() {
            for token in &mut tokens {
                token.map_strings(&|s| stash.restore(s));
            }
        }
        tokens
    }

    /// Split `src` into text and inline extension tokens.
    ///
    /// At each position the earliest candidate wins; ties go to the rule
    /// registered first. A rule whose parse fails is retried one character
    /// later.
    pub fn inline(&self, src: &str) -> Vec<Token> {
        let rules: Vec<_> = self.registry.inline_rules().collect();
        let mut tokens = Vec::new();
        let mut pos = 0;
        // Per-rule byte offset to search from (absolute).
        let mut search_from = vec![0; rules.len()];

        'outer: while pos < src.len() {
            loop {
                let mut best: Option<(usize, usize)> = None;
                for (idx, rule) in rules.iter().enumerate() {
                    let from = search_from[idx].max(pos);
                    if from >= src.len() {
                        continue;
                    }
                    if let Some(offset) = rule.start(&src[from..]) {
                        let start = from + offset;
                        if best.is_none_or(|(_, s)| start < s) {
                            best = Some((idx, start));
                        }
                    } else {
                        search_from[idx] = src.len();
                    }
                }

                let Some((idx, start)) = best else {
                    break 'outer;
                };
                let rule = rules[idx];
                match rule.parse(&src[start..], self) {
                    Some(mut token) if !token.raw.is_empty() => {
                        if start > pos {
                            tokens.push(Token::text(&src[pos..start]));
                        }
                        pos = start + token.raw.len();
                        token.rule = Some(rule.name().to_owned());
                        tokens.push(token);
                        continue 'outer;
                    }
                    _ => {
                        let step = src[start..].chars().next().map_or(1, char::len_utf8);
                        search_from[idx] = start + step;
                    }
                }
            }
        }

        if pos < src.len() {
            tokens.push(Token::text(&src[pos..]));
        }
        tokens
    }
}

/// Opaque spans swapped out of inline text.
struct Stash {
    text: String,
    spans: Vec<String>,
}

impl Stash {
    fn protect(src: &str) -> Self {
        let mut stash = Self {
            text: String::with_capacity(src.len()),
            spans: Vec::new(),
        };
        let mut pos = 0;

        while let Some(c) = src[pos..].chars().next() {
            let rest = &src[pos..];
            let span_len = match c {
                '\\' => rest[1..]
                    .chars()
                    .next()
                    .filter(char::is_ascii_punctuation)
                    .map(|_| 2),
                '`' => code_span_len(rest),
                '$' => math_span_len(rest),
                '<' => HTML_SPAN.find(rest).map(|m| m.end()),
                ']' if rest.starts_with("](") => {
                    rest.find(')').filter(|&end| !rest[..end].contains('\n')).map(|end| end + 1)
                }
                _ => None,
            };

            match span_len {
                Some(len) => {
                    // Keep the `]` so link text still parses.
                    let (keep, hide) = if c == ']' { (1, len - 1) } else { (0, len) };
                    stash.text.push_str(&rest[..keep]);
                    stash.push(&rest[keep..keep + hide]);
                    pos += len;
                }
                None if c == '`' => {
                    // An unmatched backtick run is literal as a whole.
                    let run = rest.chars().take_while(|&ch| ch == '`').count();
                    stash.text.push_str(&rest[..run]);
                    pos += run;
                }
                None => {
                    stash.text.push(c);
                    pos += c.len_utf8();
                }
            }
        }
        stash
    }

    fn push(&mut self, span: &str) {
        self.text.push(STASH_OPEN);
        self.text.push_str(&self.spans.len().to_string());
        self.text.push(STASH_CLOSE);
        self.spans.push(span.to_owned());
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn restore(&self, s: &str) -> String {
        STASH_MARKER
            .replace_all(s, |caps: &regex::Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.spans.get(i))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_owned())
            })
            .into_owned()
    }
}

/// Length of a code span starting at `s`, if its closing run exists.
fn code_span_len(s: &str) -> Option<usize> {
    let open = s.chars().take_while(|&c| c == '`').count();
    let mut pos = open;
    while let Some(offset) = s[pos..].find('`') {
        let start = pos + offset;
        let run = s[start..].chars().take_while(|&c| c == '`').count();
        if run == open {
            return Some(start + run);
        }
        pos = start + run;
    }
    None
}

/// Length of a `$...$` or `$$...$$` span starting at `s`.
fn math_span_len(s: &str) -> Option<usize> {
    if let Some(body) = s.strip_prefix("$$") {
        let end = body.find("$$")?;
        return (end > 0).then_some(end + 4);
    }
    let body = &s[1..];
    if body.starts_with(char::is_whitespace) {
        return None;
    }
    let end = body.find('$')?;
    let content = &body[..end];
    (!content.is_empty() && !content.ends_with(char::is_whitespace) && !content.contains("\n\n"))
        .then_some(end + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| match &t.kind {
                TokenKind::Markdown => "markdown".to_owned(),
                TokenKind::Text => format!("text:{}", t.raw),
                TokenKind::Verbatim => format!("verbatim:{}", t.raw),
                TokenKind::Extension(kind) => format!("{kind}:{}", t.raw),
            })
            .collect()
    }

    #[test]
    fn test_blocks_split_around_extensions() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);
        let tokens = lexer.blocks("Intro\n\n!!! note\nBody\n!!!\n\nOutro");

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].raw, "Intro\n");
        assert_eq!(tokens[1].extension_kind(), Some("alert"));
        assert_eq!(tokens[1].rule.as_deref(), Some("alert"));
        assert_eq!(tokens[2].raw, "\nOutro");
    }

    #[test]
    fn test_block_markers_in_code_are_markdown() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);
        let tokens = lexer.blocks("```\n!!! note\n[[toc]]\n```\n\n    |||");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Markdown);
    }

    #[test]
    fn test_markdown_children_keep_code_verbatim() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);
        let tokens = lexer.blocks("a *b*\n```\n*c*\n```\nd");

        assert_eq!(
            kinds(&tokens[0].children),
            vec![
                "text:a ",
                "emphasis:*b*",
                "text:\n",
                "verbatim:```\n*c*\n```\n",
                "text:d",
            ]
        );
    }

    #[test]
    fn test_spans_stay_inside_list_items_and_cells() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);

        let tokens = lexer.blocks("- *a\n- b*");
        assert_eq!(
            kinds(&tokens[0].children),
            vec!["text:- ", "text:*a\n", "text:- ", "text:b*"]
        );

        let tokens = lexer.blocks("| __a | b__ |\n|---|---|");
        assert!(
            tokens[0]
                .children
                .iter()
                .all(|t| t.kind == TokenKind::Text),
            "{:?}",
            tokens[0].children
        );
    }

    #[test]
    fn test_list_continuation_is_inline_lexed() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);
        let tokens = lexer.blocks("- a\n\n    [漢字]{かんじ} and __u__");

        let kinds = kinds(&tokens[0].children);
        assert!(kinds.contains(&"ruby:[漢字]{かんじ}".to_owned()), "{kinds:?}");
        assert!(kinds.contains(&"underline:__u__".to_owned()), "{kinds:?}");
    }

    #[test]
    fn test_inline_earliest_candidate_wins() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);
        let tokens = lexer.inline_tokens("x [漢字]{かんじ} and ~~gone~~ [^1]");

        assert_eq!(
            kinds(&tokens),
            vec![
                "text:x ",
                "ruby:[漢字]{かんじ}",
                "text: and ",
                "strikethrough:~~gone~~",
                "text: ",
                "footnoteReference:[^1]",
            ]
        );
    }

    #[test]
    fn test_inline_nested() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);
        let tokens = lexer.inline_tokens("*a __b__ c*");

        assert_eq!(tokens.len(), 1);
        assert_eq!(
            kinds(&tokens[0].children),
            vec!["text:a ", "underline:__b__", "text: c"]
        );
    }

    #[test]
    fn test_protected_spans_are_opaque() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);

        for text in [
            "`*not em*`",
            r"\*not em\*",
            "$a*b*c$",
            "<span title=\"*x*\">",
            "[link](https://example.com/a__b__c)",
        ] {
            let tokens = lexer.inline_tokens(text);
            assert!(
                tokens.iter().all(|t| t.kind == TokenKind::Text),
                "{text}: {tokens:?}"
            );
            let joined: String = tokens.iter().map(|t| t.raw.as_str()).collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn test_restore_inside_extension_tokens() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);
        let tokens = lexer.inline_tokens("**use `x*y`**");

        assert_eq!(tokens[0].raw, "**use `x*y`**");
        assert_eq!(tokens[0].children[0].raw, "use `x*y`");
    }

    #[test]
    fn test_failed_parse_retries_later() {
        let registry = ExtensionRegistry::with_defaults();
        let lexer = Lexer::new(&registry);
        let tokens = lexer.inline_tokens("[a] then [b]{c}");

        assert_eq!(kinds(&tokens), vec!["text:[a] then ", "ruby:[b]{c}"]);
    }

    #[test]
    fn test_no_inline_rules() {
        let registry = ExtensionRegistry::new();
        let lexer = Lexer::new(&registry);
        assert_eq!(kinds(&lexer.inline_tokens("*a*")), vec!["text:*a*"]);
    }

    #[test]
    fn test_math_span_len() {
        assert_eq!(math_span_len("$x$ rest"), Some(3));
        assert_eq!(math_span_len("$$x$$"), Some(5));
        assert_eq!(math_span_len("$ x$"), None);
        assert_eq!(math_span_len("$5 and $"), None);
        assert_eq!(math_span_len("$$$$"), None);
    }

    #[test]
    fn test_code_span_len() {
        assert_eq!(code_span_len("`a` b"), Some(3));
        assert_eq!(code_span_len("``a ` b`` c"), Some(9));
        assert_eq!(code_span_len("``a`"), None);
    }
}
