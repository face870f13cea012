//! Theme data types.

/// Selectors every resolved theme defines.
///
/// Themes missing one of these get the `default` theme's rule for it.
pub const REQUIRED_SELECTORS: [&str; 6] = ["h1", "h2", "p", "blockquote", "pre", "code"];

/// A single CSS declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    /// CSS property name (e.g., `font-size`).
    pub property: String,
    /// Property value, emitted verbatim.
    pub value: String,
}

impl Declaration {
    /// Create a declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Declarations for one element selector.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// Element selector relative to the document root (e.g., `blockquote`).
    pub selector: String,
    /// Declarations in emission order.
    pub declarations: Vec<Declaration>,
}

/// A named style bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Identifier used for lookup.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Document-wide declarations, applied as inline style.
    pub base: Vec<Declaration>,
    /// Per-selector rules in declaration order.
    pub block: Vec<Rule>,
}

impl Theme {
    /// Create an empty theme.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base: Vec::new(),
            block: Vec::new(),
        }
    }

    /// Add a base declaration.
    ///
    /// A repeated property keeps its first position and takes the new value.
    #[must_use]
    pub fn with_base(mut self, property: &str, value: &str) -> Self {
        set_declaration(&mut self.base, property, value);
        self
    }

    /// Add a declaration to the rule for `selector`, creating the rule if needed.
    #[must_use]
    pub fn with_rule(mut self, selector: &str, property: &str, value: &str) -> Self {
        self.set_rule_declaration(selector, property, value);
        self
    }

    /// Set one declaration of the rule for `selector`.
    pub fn set_rule_declaration(&mut self, selector: &str, property: &str, value: &str) {
        let index = match self.block.iter().position(|r| r.selector == selector) {
            Some(index) => index,
            None => {
                self.block.push(Rule {
                    selector: selector.to_owned(),
                    declarations: Vec::new(),
                });
                self.block.len() - 1
            }
        };
        set_declaration(&mut self.block[index].declarations, property, value);
    }

    /// Get the rule for a selector.
    pub fn rule(&self, selector: &str) -> Option<&Rule> {
        self.block.iter().find(|r| r.selector == selector)
    }

    /// Get a base declaration value.
    pub fn base_value(&self, property: &str) -> Option<&str> {
        self.base
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// Copy required selectors missing from this theme out of `fallback`.
    ///
    /// Returns the selectors that were filled in.
    pub fn fill_required(&mut self, fallback: &Theme) -> Vec<&'static str> {
        let mut filled = Vec::new();
        for selector in REQUIRED_SELECTORS {
            if self.rule(selector).is_some() {
                continue;
            }
            if let Some(rule) = fallback.rule(selector) {
                self.block.push(rule.clone());
                filled.push(selector);
            }
        }
        filled
    }
}

fn set_declaration(declarations: &mut Vec<Declaration>, property: &str, value: &str) {
    if let Some(existing) = declarations.iter_mut().find(|d| d.property == property) {
        value.clone_into(&mut existing.value);
    } else {
        declarations.push(Declaration::new(property, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_with_rule_groups_by_selector() {
        let theme = Theme::new("t", "T")
            .with_rule("h1", "color", "red")
            .with_rule("p", "margin", "0")
            .with_rule("h1", "font-size", "2em");

        assert_eq!(theme.block.len(), 2);
        let h1 = theme.rule("h1").unwrap();
        assert_eq!(
            h1.declarations,
            vec![
                Declaration::new("color", "red"),
                Declaration::new("font-size", "2em"),
            ]
        );
    }

    #[test]
    fn test_repeated_property_keeps_position() {
        let theme = Theme::new("t", "T")
            .with_rule("h1", "color", "#1a202c")
            .with_rule("h1", "margin-top", "1em")
            .with_rule("h1", "color", "#333333");

        let h1 = theme.rule("h1").unwrap();
        assert_eq!(h1.declarations[0], Declaration::new("color", "#333333"));
        assert_eq!(h1.declarations.len(), 2);
    }

    #[test]
    fn test_fill_required_only_missing() {
        let fallback = Theme::new("default", "Default")
            .with_rule("h1", "color", "black")
            .with_rule("h2", "color", "gray")
            .with_rule("p", "margin", "1em 0");
        let mut theme = Theme::new("custom", "Custom").with_rule("h1", "color", "navy");

        let filled = theme.fill_required(&fallback);

        assert_eq!(filled, vec!["h2", "p"]);
        assert_eq!(theme.rule("h1").unwrap().declarations[0].value, "navy");
        assert_eq!(theme.rule("h2").unwrap().declarations[0].value, "gray");
    }

    #[test]
    fn test_base_value() {
        let theme = Theme::new("t", "T").with_base("line-height", "1.6");
        assert_eq!(theme.base_value("line-height"), Some("1.6"));
        assert_eq!(theme.base_value("color"), None);
    }
}
