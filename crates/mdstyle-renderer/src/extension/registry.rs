//! Extension rule registry.

use super::{
    AlertRule, BlockRule, DelimiterRule, Extension, FootnoteDefinitionRule,
    FootnoteReferenceRule, InlineRule, PlantUmlRule, RubyRule, SliderRule, TocRule,
};

/// Ordered set of extension rules.
///
/// Built once at startup and shared by reference; rules are never mutated
/// while rendering. Registration order is match priority. Names share one
/// namespace: registering a name again replaces the earlier rule in place,
/// keeping its priority.
///
/// # Example
///
/// ```
/// use mdstyle_renderer::extension::{DelimiterRule, ExtensionRegistry};
///
/// let registry = ExtensionRegistry::new()
///     .with_inline(DelimiterRule::new("highlight", "mark", '=', &[2]));
///
/// assert!(registry.inline("highlight").is_some());
/// assert!(registry.block("alert").is_none());
/// ```
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    rules: Vec<Extension>,
}

impl ExtensionRegistry {
    /// Create an empty registry (plain `CommonMark`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in rules.
    ///
    /// Block order: slider, alert, footnote definitions, `PlantUML`, table of
    /// contents. Inline order: footnote references, strong, emphasis,
    /// underline, strikethrough, ruby.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .with_block(SliderRule)
            .with_block(AlertRule)
            .with_block(FootnoteDefinitionRule)
            .with_inline(FootnoteReferenceRule)
            .with_inline(DelimiterRule::new("strong", "strong", '*', &[3]))
            .with_inline(DelimiterRule::new("emphasis", "em", '*', &[2, 1]))
            .with_inline(DelimiterRule::new("underline", "u", '_', &[2]).intraword(false))
            .with_inline(DelimiterRule::new("strikethrough", "del", '~', &[2]))
            .with_block(PlantUmlRule)
            .with_inline(RubyRule)
            .with_block(TocRule)
    }

    /// Register a rule, replacing any rule with the same name.
    pub fn register(&mut self, extension: Extension) {
        if let Some(existing) = self
            .rules
            .iter_mut()
            .find(|r| r.name() == extension.name())
        {
            tracing::debug!(rule = extension.name(), "Replacing registered extension");
            *existing = extension;
        } else {
            self.rules.push(extension);
        }
    }

    /// Register a block rule.
    pub fn register_block<R: BlockRule + 'static>(&mut self, rule: R) {
        self.register(Extension::Block(Box::new(rule)));
    }

    /// Register an inline rule.
    pub fn register_inline<R: InlineRule + 'static>(&mut self, rule: R) {
        self.register(Extension::Inline(Box::new(rule)));
    }

    /// Register a block rule (builder form).
    #[must_use]
    pub fn with_block<R: BlockRule + 'static>(mut self, rule: R) -> Self {
        self.register_block(rule);
        self
    }

    /// Register an inline rule (builder form).
    #[must_use]
    pub fn with_inline<R: InlineRule + 'static>(mut self, rule: R) -> Self {
        self.register_inline(rule);
        self
    }

    /// Block rules in priority order.
    pub fn block_rules(&self) -> impl Iterator<Item = &dyn BlockRule> {
        self.rules.iter().filter_map(|r| match r {
            Extension::Block(rule) => Some(rule.as_ref()),
            Extension::Inline(_) => None,
        })
    }

    /// Inline rules in priority order.
    pub fn inline_rules(&self) -> impl Iterator<Item = &dyn InlineRule> {
        self.rules.iter().filter_map(|r| match r {
            Extension::Inline(rule) => Some(rule.as_ref()),
            Extension::Block(_) => None,
        })
    }

    /// Look up a block rule by name.
    pub fn block(&self, name: &str) -> Option<&dyn BlockRule> {
        self.block_rules().find(|r| r.name() == name)
    }

    /// Look up an inline rule by name.
    pub fn inline(&self, name: &str) -> Option<&dyn InlineRule> {
        self.inline_rules().find(|r| r.name() == name)
    }

    /// Whether any inline rules are registered.
    pub fn has_inline_rules(&self) -> bool {
        self.inline_rules().next().is_some()
    }

    /// Rule names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Extension::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lexer;
    use crate::extension::{Level, RenderContext, RenderFault};
    use crate::token::Token;
    use pretty_assertions::assert_eq;

    struct Named(&'static str, &'static str);

    impl BlockRule for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn recognize(&self, _line: &str) -> bool {
            false
        }

        fn parse(&self, _lines: &[&str], _lexer: &Lexer<'_>) -> Option<(Token, usize)> {
            None
        }

        fn render(
            &self,
            _token: &Token,
            _ctx: &mut RenderContext<'_>,
        ) -> Result<String, RenderFault> {
            Ok(self.1.to_owned())
        }
    }

    #[test]
    fn test_default_order() {
        let registry = ExtensionRegistry::with_defaults();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "slider",
                "alert",
                "footnoteDefinition",
                "footnoteReference",
                "strong",
                "emphasis",
                "underline",
                "strikethrough",
                "plantuml",
                "ruby",
                "toc",
            ]
        );
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let mut registry = ExtensionRegistry::new()
            .with_block(Named("a", "first"))
            .with_block(Named("b", "b"));
        registry.register_block(Named("a", "second"));

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(registry.block_rules().count(), 2);
    }

    #[test]
    fn test_replacement_can_change_level() {
        let registry = ExtensionRegistry::with_defaults()
            .with_block(Named("ruby", "<ruby-block>"));

        assert!(registry.inline("ruby").is_none());
        assert!(registry.block("ruby").is_some());
        assert_eq!(
            registry.rules.iter().find(|r| r.name() == "ruby").map(Extension::level),
            Some(Level::Block)
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = ExtensionRegistry::new();
        assert!(!registry.has_inline_rules());
        assert_eq!(registry.block_rules().count(), 0);
    }
}
