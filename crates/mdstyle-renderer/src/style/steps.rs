//! Built-in style steps, in application order.

use mdstyle_themes::{Declaration, ROOT_CLASS, Theme, generate_css, scoped_rule};

use super::{BODY_CLASS, Element, StyleStep, StyledDocument};
use crate::config::RenderConfig;

/// The default pipeline.
pub fn default_steps() -> Vec<Box<dyn StyleStep>> {
    vec![
        Box::new(ThemeSheet),
        Box::new(BaseContainer),
        Box::new(FontFamily),
        Box::new(FontSizeTier),
        Box::new(ThemeColor),
        Box::new(ParagraphIndent),
        Box::new(ParagraphJustify),
        Box::new(MacCodeBlock),
        Box::new(LineNumbers),
        Box::new(RootContainer),
    ]
}

fn declarations(pairs: &[(&str, &str)]) -> Vec<Declaration> {
    pairs
        .iter()
        .map(|(property, value)| Declaration::new(*property, *value))
        .collect()
}

/// Scoped stylesheet of the theme's selector rules.
pub struct ThemeSheet;

impl StyleStep for ThemeSheet {
    fn name(&self) -> &'static str {
        "theme-sheet"
    }

    fn apply(&self, doc: &mut StyledDocument, theme: &Theme, _config: &RenderConfig) {
        doc.push_sheet(generate_css(theme));
    }
}

/// `div.markdown-body` carrying the theme's base typography.
pub struct BaseContainer;

impl StyleStep for BaseContainer {
    fn name(&self) -> &'static str {
        "base"
    }

    fn apply(&self, doc: &mut StyledDocument, theme: &Theme, _config: &RenderConfig) {
        let mut container = Element::new("div").with_class(BODY_CLASS);
        for decl in &theme.base {
            container.set_style(&decl.property, &decl.value);
        }
        doc.wrap(container);
    }
}

/// Font family from the configuration.
///
/// The base container's own `font-family` would shadow the inherited one,
/// so it is removed.
pub struct FontFamily;

impl StyleStep for FontFamily {
    fn name(&self) -> &'static str {
        "font-family"
    }

    fn apply(&self, doc: &mut StyledDocument, _theme: &Theme, config: &RenderConfig) {
        let font = config.font.trim();
        if font.is_empty() {
            return;
        }
        if let Some(body) = doc.body_mut() {
            body.remove_style("font-family");
        }
        doc.wrap(Element::new("div").with_style("font-family", font));
    }
}

/// Font size from the configured tier.
pub struct FontSizeTier;

impl StyleStep for FontSizeTier {
    fn name(&self) -> &'static str {
        "font-size"
    }

    fn apply(&self, doc: &mut StyledDocument, _theme: &Theme, config: &RenderConfig) {
        if let Some(body) = doc.body_mut() {
            body.remove_style("font-size");
        }
        doc.wrap(Element::new("div").with_style("font-size", config.font_size.css()));
    }
}

/// Accent color variable plus the heading overrides that use it.
pub struct ThemeColor;

impl ThemeColor {
    fn heading_sheet() -> String {
        let pill = |size: &'static str, margin: &'static str| {
            declarations(&[
                ("display", "table"),
                ("margin", margin),
                ("padding", "0.3em 1em"),
                ("border-radius", "8px"),
                ("background", "var(--theme-color)"),
                ("color", "#fff"),
                ("text-align", "center"),
                ("font-size", size),
            ])
        };
        let small_pill = |size: &'static str| {
            declarations(&[
                ("display", "inline-block"),
                ("margin", "1.2em 0 0.6em"),
                ("padding", "0.1em 0.6em"),
                ("border-radius", "4px"),
                ("background", "var(--theme-color)"),
                ("color", "#fff"),
                ("font-size", size),
            ])
        };
        let underline = declarations(&[
            ("display", "block"),
            ("margin", "1.5em 0 0.8em"),
            ("padding-bottom", "0.3em"),
            ("border-bottom", "2px solid var(--theme-color)"),
            ("color", "var(--theme-color)"),
            ("text-align", "left"),
            ("font-size", "20px"),
        ]);

        let rules = [
            ("h1", pill("24px", "2em auto 1em")),
            ("h2", pill("22px", "1.5em auto 1em")),
            ("h3", underline),
            ("h4", small_pill("18px")),
            ("h5", small_pill("16px")),
            ("h6", small_pill("15px")),
        ];
        rules
            .iter()
            .map(|(tag, decls)| scoped_rule(&format!(".{BODY_CLASS} {tag}"), decls, true))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl StyleStep for ThemeColor {
    fn name(&self) -> &'static str {
        "theme-color"
    }

    fn apply(&self, doc: &mut StyledDocument, _theme: &Theme, config: &RenderConfig) {
        doc.wrap(Element::new("div").with_style("--theme-color", config.theme_color.trim()));
        doc.push_sheet(Self::heading_sheet());
    }
}

/// First-line indent for paragraphs.
pub struct ParagraphIndent;

impl StyleStep for ParagraphIndent {
    fn name(&self) -> &'static str {
        "paragraph-indent"
    }

    fn apply(&self, doc: &mut StyledDocument, _theme: &Theme, config: &RenderConfig) {
        if config.paragraph_indent {
            doc.wrap(Element::new("div").with_style("text-indent", "2em"));
        }
    }
}

/// Justified text.
pub struct ParagraphJustify;

impl StyleStep for ParagraphJustify {
    fn name(&self) -> &'static str {
        "paragraph-justify"
    }

    fn apply(&self, doc: &mut StyledDocument, _theme: &Theme, config: &RenderConfig) {
        if config.paragraph_justify {
            doc.wrap(Element::new("div").with_style("text-align", "justify"));
        }
    }
}

/// Rounded, shadowed code blocks.
pub struct MacCodeBlock;

impl StyleStep for MacCodeBlock {
    fn name(&self) -> &'static str {
        "mac-code-block"
    }

    fn apply(&self, doc: &mut StyledDocument, _theme: &Theme, config: &RenderConfig) {
        if config.mac_code_block {
            let decls = declarations(&[
                ("border-radius", "8px"),
                ("box-shadow", "0 4px 12px rgba(0,0,0,0.1)"),
            ]);
            doc.push_sheet(scoped_rule("pre", &decls, false));
        }
    }
}

/// Counter-based line numbers for `span.line` in code blocks.
pub struct LineNumbers;

impl StyleStep for LineNumbers {
    fn name(&self) -> &'static str {
        "line-numbers"
    }

    fn apply(&self, doc: &mut StyledDocument, _theme: &Theme, config: &RenderConfig) {
        if !config.code_line_numbers {
            return;
        }
        let sheet = [
            scoped_rule("pre code", &declarations(&[("counter-reset", "line")]), false),
            scoped_rule(
                "pre code span.line",
                &declarations(&[("counter-increment", "line")]),
                false,
            ),
            scoped_rule(
                "pre code span.line::before",
                &declarations(&[
                    ("content", "counter(line)"),
                    ("display", "inline-block"),
                    ("width", "2em"),
                    ("padding-right", "1em"),
                    ("text-align", "right"),
                    ("color", "#666"),
                    ("border-right", "1px solid #ddd"),
                    ("margin-right", "1em"),
                ]),
                false,
            ),
        ];
        doc.push_sheet(sheet.join("\n"));
    }
}

/// Outermost `div.markdown-content`, the scope of every stylesheet rule.
pub struct RootContainer;

impl StyleStep for RootContainer {
    fn name(&self) -> &'static str {
        "root"
    }

    fn apply(&self, doc: &mut StyledDocument, _theme: &Theme, _config: &RenderConfig) {
        doc.wrap(Element::new("div").with_class(ROOT_CLASS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FontSize;
    use crate::style::Node;
    use mdstyle_themes::ThemeRegistry;
    use pretty_assertions::assert_eq;

    fn run(step: &dyn StyleStep, config: &RenderConfig) -> StyledDocument {
        let themes = ThemeRegistry::builtin();
        let mut doc = StyledDocument::new("<p>x</p>");
        BaseContainer.apply(&mut doc, themes.resolve(&config.theme), config);
        step.apply(&mut doc, themes.resolve(&config.theme), config);
        doc
    }

    fn root_element(doc: &StyledDocument) -> &Element {
        match &doc.root {
            Node::Element(element) => element,
            Node::Raw(_) => panic!("root is raw"),
        }
    }

    #[test]
    fn test_theme_sheet_matches_generate_css() {
        let themes = ThemeRegistry::builtin();
        let theme = themes.resolve("github");
        let mut doc = StyledDocument::new("");
        ThemeSheet.apply(&mut doc, theme, &RenderConfig::default());
        assert_eq!(doc.sheets, vec![generate_css(theme)]);
    }

    #[test]
    fn test_base_container_carries_theme_base() {
        let theme = Theme::new("t", "T")
            .with_base("color", "#333")
            .with_base("line-height", "1.6");
        let mut doc = StyledDocument::new("<p>x</p>");
        BaseContainer.apply(&mut doc, &theme, &RenderConfig::default());
        assert_eq!(
            doc.root.to_html(),
            r#"<div class="markdown-body" style="color: #333; line-height: 1.6;"><p>x</p></div>"#
        );
    }

    #[test]
    fn test_font_size_tiers() {
        for (size, px) in [
            (FontSize::Smaller, "12px"),
            (FontSize::Recommended, "16px"),
            (FontSize::Large, "18px"),
            (FontSize::Larger, "20px"),
        ] {
            let config = RenderConfig::default().with_font_size(size);
            let mut doc = run(&FontSizeTier, &config);
            assert_eq!(root_element(&doc).style_value("font-size"), Some(px));
            assert_eq!(doc.body_mut().unwrap().style_value("font-size"), None);
        }
    }

    #[test]
    fn test_font_family_replaces_base_font() {
        let config = RenderConfig {
            font: "serif".to_owned(),
            ..RenderConfig::default()
        };
        let mut doc = run(&FontFamily, &config);
        assert_eq!(root_element(&doc).style_value("font-family"), Some("serif"));
        assert_eq!(doc.body_mut().unwrap().style_value("font-family"), None);
    }

    #[test]
    fn test_empty_font_family_is_noop() {
        let config = RenderConfig {
            font: String::new(),
            ..RenderConfig::default()
        };
        let mut doc = run(&FontFamily, &config);
        assert!(root_element(&doc).has_class(BODY_CLASS));
        assert!(doc.body_mut().unwrap().style_value("font-family").is_some());
    }

    #[test]
    fn test_theme_color_wrap_and_headings() {
        let config = RenderConfig::default().with_theme_color("#ff0000");
        let doc = run(&ThemeColor, &config);
        assert_eq!(root_element(&doc).style_value("--theme-color"), Some("#ff0000"));

        let sheet = &doc.sheets[0];
        for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
            assert!(sheet.contains(&format!(".markdown-content .markdown-body {tag} {{")));
        }
        assert!(sheet.contains("background: var(--theme-color) !important;"));
        assert!(sheet.contains("border-bottom: 2px solid var(--theme-color) !important;"));
    }

    #[test]
    fn test_paragraph_toggles() {
        let config = RenderConfig {
            paragraph_indent: true,
            paragraph_justify: true,
            ..RenderConfig::default()
        };
        assert_eq!(
            root_element(&run(&ParagraphIndent, &config)).style_value("text-indent"),
            Some("2em")
        );
        assert_eq!(
            root_element(&run(&ParagraphJustify, &config)).style_value("text-align"),
            Some("justify")
        );

        let off = RenderConfig::default();
        assert!(root_element(&run(&ParagraphIndent, &off)).has_class(BODY_CLASS));
        assert!(root_element(&run(&ParagraphJustify, &off)).has_class(BODY_CLASS));
    }

    #[test]
    fn test_mac_code_block() {
        let doc = run(&MacCodeBlock, &RenderConfig::default());
        assert_eq!(
            doc.sheets,
            vec![
                ".markdown-content pre { border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.1); }"
                    .to_owned()
            ]
        );

        let off = RenderConfig {
            mac_code_block: false,
            ..RenderConfig::default()
        };
        assert!(run(&MacCodeBlock, &off).sheets.is_empty());
    }

    #[test]
    fn test_line_numbers() {
        let config = RenderConfig {
            code_line_numbers: true,
            ..RenderConfig::default()
        };
        let doc = run(&LineNumbers, &config);
        let sheet = &doc.sheets[0];
        assert!(sheet.contains(".markdown-content pre code { counter-reset: line; }"));
        assert!(sheet.contains(".markdown-content pre code span.line::before { content: counter(line);"));

        assert!(run(&LineNumbers, &RenderConfig::default()).sheets.is_empty());
    }

    #[test]
    fn test_root_container_outermost() {
        let doc = run(&RootContainer, &RenderConfig::default());
        assert!(root_element(&doc).has_class(ROOT_CLASS));
    }
}
