//! Intermediate parse nodes.

use std::collections::HashMap;

/// Kind of a [`Token`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Source handed to the built-in `CommonMark` grammar.
    ///
    /// Children hold its inline tokens and verbatim code regions.
    Markdown,
    /// Literal inline markdown text between extension matches.
    Text,
    /// Code region that inline rules must not touch.
    Verbatim,
    /// Token produced by an extension rule (e.g. `alert`, `ruby`).
    Extension(String),
}

/// An intermediate parsed unit of markdown source.
///
/// Produced once per render pass and dropped after HTML generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Name of the rule that produced this token, if any.
    pub rule: Option<String>,
    /// Matched source span.
    pub raw: String,
    /// Nested tokens (block bodies or inline content).
    pub children: Vec<Token>,
    /// Kind-specific fields (e.g. `alertType`, `title`, `id`, `ruby`).
    pub attrs: HashMap<String, String>,
}

impl Token {
    /// Create a token of the given kind.
    pub fn new(kind: TokenKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            rule: None,
            raw: raw.into(),
            children: Vec::new(),
            attrs: HashMap::new(),
        }
    }

    /// Create a literal text token.
    pub fn text(raw: impl Into<String>) -> Self {
        Self::new(TokenKind::Text, raw)
    }

    /// Create a verbatim code token.
    pub fn verbatim(raw: impl Into<String>) -> Self {
        Self::new(TokenKind::Verbatim, raw)
    }

    /// Create an extension token produced by `rule`.
    pub fn extension(kind: &str, rule: &str, raw: impl Into<String>) -> Self {
        let mut token = Self::new(TokenKind::Extension(kind.to_owned()), raw);
        token.rule = Some(rule.to_owned());
        token
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(key.to_owned(), value.into());
        self
    }

    /// Set the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }

    /// Get an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Extension kind name, if this is an extension token.
    pub fn extension_kind(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Extension(kind) => Some(kind),
            _ => None,
        }
    }

    /// Rewrite every string in this token tree.
    pub(crate) fn map_strings(&mut self, f: &impl Fn(&str) -> String) {
        self.raw = f(&self.raw);
        for value in self.attrs.values_mut() {
            *value = f(value);
        }
        for child in &mut self.children {
            child.map_strings(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_token() {
        let token = Token::extension("ruby", "ruby", "[a]{b}").with_attr("ruby", "b");
        assert_eq!(token.extension_kind(), Some("ruby"));
        assert_eq!(token.rule.as_deref(), Some("ruby"));
        assert_eq!(token.attr("ruby"), Some("b"));
        assert_eq!(token.attr("missing"), None);
    }

    #[test]
    fn test_map_strings_recurses() {
        let mut token = Token::extension("strong", "strong", "**x**")
            .with_attr("title", "x")
            .with_children(vec![Token::text("x")]);
        token.map_strings(&|s| s.replace('x', "y"));

        assert_eq!(token.raw, "**y**");
        assert_eq!(token.attr("title"), Some("y"));
        assert_eq!(token.children[0].raw, "y");
    }
}
