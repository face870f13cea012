//! Theme lookup.

use std::collections::HashMap;

use crate::builtin;
use crate::theme::Theme;

/// Identifier of the fallback theme.
pub const DEFAULT_THEME: &str = "default";

/// Mapping from theme id to [`Theme`].
///
/// Built once at startup and shared by reference. Every stored theme defines
/// the required selectors: gaps are filled from the `default` theme on
/// registration, so [`resolve`](Self::resolve) never has to merge.
#[derive(Clone, Debug)]
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
    /// Theme ids in registration order, for listing.
    order: Vec<String>,
    aliases: HashMap<String, String>,
}

impl ThemeRegistry {
    /// Create a registry holding the built-in themes and aliases.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self {
            themes: HashMap::new(),
            order: Vec::new(),
            aliases: HashMap::new(),
        };
        for theme in builtin::themes() {
            registry.insert(theme);
        }
        for (alias, target) in builtin::ALIASES {
            registry.aliases.insert(alias.to_owned(), target.to_owned());
        }
        registry
    }

    /// Register a theme, replacing any theme with the same id.
    ///
    /// Required selectors the theme leaves out are copied from `default`.
    pub fn register(&mut self, mut theme: Theme) {
        let filled = theme.fill_required(self.default_theme());
        if !filled.is_empty() {
            tracing::debug!(
                theme = %theme.id,
                selectors = ?filled,
                "Filled missing theme selectors from default"
            );
        }
        if self.themes.contains_key(&theme.id) {
            tracing::debug!(theme = %theme.id, "Replacing registered theme");
        }
        self.insert(theme);
    }

    /// Register a theme (builder form).
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.register(theme);
        self
    }

    /// Resolve a theme id, following aliases.
    ///
    /// Unknown ids resolve to the `default` theme.
    pub fn resolve(&self, id: &str) -> &Theme {
        self.get(id).unwrap_or_else(|| {
            tracing::debug!(theme = id, "Unknown theme, using default");
            self.default_theme()
        })
    }

    /// Look up a theme id, following aliases, without falling back.
    pub fn get(&self, id: &str) -> Option<&Theme> {
        let id = self.aliases.get(id).map_or(id, String::as_str);
        self.themes.get(id)
    }

    /// Iterate themes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.order.iter().filter_map(|id| self.themes.get(id))
    }

    /// Iterate aliases as `(alias, target)` pairs.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    fn default_theme(&self) -> &Theme {
        // The builtin table always provides `default` and `register` can only
        // replace it, never remove it.
        &self.themes[DEFAULT_THEME]
    }

    fn insert(&mut self, theme: Theme) {
        if !self.themes.contains_key(&theme.id) {
            self.order.push(theme.id.clone());
        }
        self.themes.insert(theme.id.clone(), theme);
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_css;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_known_theme() {
        let themes = ThemeRegistry::builtin();
        assert_eq!(themes.resolve("github").id, "github");
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let themes = ThemeRegistry::builtin();
        let first = themes.resolve("nonexistent");
        let second = themes.resolve("nonexistent");

        assert_eq!(first.id, "default");
        assert_eq!(first, second);
        assert_eq!(
            generate_css(first),
            generate_css(themes.resolve("default"))
        );
    }

    #[test]
    fn test_aliases() {
        let themes = ThemeRegistry::builtin();
        assert_eq!(themes.resolve("classic").id, "doocs_classic");
        assert_eq!(themes.resolve("elegant").id, "doocs_elegant");
        assert_eq!(themes.resolve("clean").id, "clean");
    }

    #[test]
    fn test_builtin_listing_order() {
        let themes = ThemeRegistry::builtin();
        let ids: Vec<_> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "default",
                "clean",
                "modern",
                "book",
                "docs",
                "tech_blue",
                "dark_mode",
                "github",
                "wechat",
                "xiaohongshu",
                "doocs_classic",
                "doocs_elegant",
            ]
        );
    }

    #[test]
    fn test_register_fills_missing_selectors() {
        let themes = ThemeRegistry::builtin()
            .with_theme(Theme::new("sparse", "Sparse").with_rule("h1", "color", "navy"));

        let theme = themes.resolve("sparse");
        assert_eq!(theme.rule("h1").unwrap().declarations[0].value, "navy");
        assert_eq!(
            theme.rule("pre"),
            themes.resolve("default").rule("pre")
        );
    }

    #[test]
    fn test_register_replaces_same_id() {
        let themes = ThemeRegistry::builtin()
            .with_theme(Theme::new("github", "Mine").with_rule("h1", "color", "red"));

        assert_eq!(themes.resolve("github").name, "Mine");
        assert_eq!(themes.iter().filter(|t| t.id == "github").count(), 1);
    }
}
