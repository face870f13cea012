//! Per-call render configuration.

use std::fmt;

/// Default accent color.
pub const DEFAULT_THEME_COLOR: &str = "#1e40af";

/// Default `PlantUML` server.
pub const DEFAULT_PLANTUML_SERVER: &str = "https://www.plantuml.com/plantuml";

/// Font size tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontSize {
    /// 12px.
    Smaller,
    /// 14px.
    Small,
    /// 16px.
    #[default]
    Recommended,
    /// 18px.
    Large,
    /// 20px.
    Larger,
}

impl FontSize {
    /// All tiers, smallest first.
    pub const ALL: [FontSize; 5] = [
        Self::Smaller,
        Self::Small,
        Self::Recommended,
        Self::Large,
        Self::Larger,
    ];

    /// Parse a tier name, or `None` if it is not one.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.as_str() == name)
    }

    /// Parse a tier name. Unknown names fall back to
    /// [`Recommended`](Self::Recommended).
    pub fn parse(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }

    /// Tier name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smaller => "smaller",
            Self::Small => "small",
            Self::Recommended => "recommended",
            Self::Large => "large",
            Self::Larger => "larger",
        }
    }

    /// CSS pixel value, e.g. `18px`.
    pub fn css(self) -> &'static str {
        match self {
            Self::Smaller => "12px",
            Self::Small => "14px",
            Self::Recommended => "16px",
            Self::Large => "18px",
            Self::Larger => "20px",
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options controlling a single render call.
///
/// Immutable for the duration of the call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderConfig {
    /// Theme id. Unknown ids render with the default theme.
    pub theme: String,
    /// CSS `font-family` value.
    pub font: String,
    /// Font size tier.
    pub font_size: FontSize,
    /// Accent color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub theme_color: String,
    /// Rounded, shadowed code blocks.
    pub mac_code_block: bool,
    /// Number code block lines.
    pub code_line_numbers: bool,
    /// Indent the first line of paragraphs.
    pub paragraph_indent: bool,
    /// Justify text.
    pub paragraph_justify: bool,
    /// Footer list of external links.
    pub link_references: bool,
    /// Render single newlines as line breaks.
    pub line_breaks: bool,
    /// `PlantUML` server base URL.
    pub plantuml_server: String,
    /// Title of the `[[toc]]` block. Empty for none.
    pub toc_title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: mdstyle_themes::DEFAULT_THEME.to_owned(),
            font: "sans-serif".to_owned(),
            font_size: FontSize::Recommended,
            theme_color: DEFAULT_THEME_COLOR.to_owned(),
            mac_code_block: true,
            code_line_numbers: false,
            paragraph_indent: false,
            paragraph_justify: false,
            link_references: false,
            line_breaks: true,
            plantuml_server: DEFAULT_PLANTUML_SERVER.to_owned(),
            toc_title: "Contents".to_owned(),
        }
    }
}

impl RenderConfig {
    /// Set the theme id.
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set the font size tier.
    #[must_use]
    pub fn with_font_size(mut self, font_size: FontSize) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the accent color.
    #[must_use]
    pub fn with_theme_color(mut self, color: impl Into<String>) -> Self {
        self.theme_color = color.into();
        self
    }
}

/// Whether `color` is a `#rgb`, `#rrggbb` or `#rrggbbaa` hex color.
pub fn is_hex_color(color: &str) -> bool {
    color.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_font_size_tiers() {
        assert_eq!(FontSize::parse("smaller").css(), "12px");
        assert_eq!(FontSize::parse("small").css(), "14px");
        assert_eq!(FontSize::parse("recommended").css(), "16px");
        assert_eq!(FontSize::parse("large").css(), "18px");
        assert_eq!(FontSize::parse("larger").css(), "20px");
    }

    #[test]
    fn test_unknown_font_size_is_recommended() {
        assert_eq!(FontSize::parse("giant"), FontSize::Recommended);
        assert_eq!(FontSize::from_name("giant"), None);
    }

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.theme, "default");
        assert_eq!(config.theme_color, "#1e40af");
        assert!(config.mac_code_block);
        assert!(config.line_breaks);
        assert!(!config.code_line_numbers);
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#1e40af"));
        assert!(is_hex_color("#1e40af80"));
        assert!(!is_hex_color("1e40af"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#ggg"));
        assert!(!is_hex_color("red"));
    }
}
