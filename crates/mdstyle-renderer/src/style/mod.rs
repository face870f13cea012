//! Style application pipeline.
//!
//! Rendered HTML is wrapped in a small element tree and passed through an
//! ordered list of [`StyleStep`]s. Each step either wraps the tree in a new
//! container with inline style, adjusts an existing container, or appends a
//! stylesheet. The result is the stylesheet in a `<style>` element followed
//! by the tree.
//!
//! The innermost container has class `markdown-body` and the outermost
//! `markdown-content`, the class every theme rule is scoped under.

mod steps;
mod tree;

use mdstyle_themes::Theme;

use crate::config::RenderConfig;

pub use steps::{
    BaseContainer, FontFamily, FontSizeTier, LineNumbers, MacCodeBlock, ParagraphIndent,
    ParagraphJustify, RootContainer, ThemeColor, ThemeSheet, default_steps,
};
pub use tree::{Element, Node};

/// Class of the container carrying the theme's base typography.
pub const BODY_CLASS: &str = "markdown-body";

/// Stylesheets plus the element tree they apply to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledDocument {
    /// Stylesheets in application order.
    pub sheets: Vec<String>,
    /// Root of the element tree.
    pub root: Node,
}

impl StyledDocument {
    /// Start from rendered HTML with no styles.
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            sheets: Vec::new(),
            root: Node::Raw(html.into()),
        }
    }

    /// Make `container` the new root, with the current root as its only child.
    pub fn wrap(&mut self, container: Element) {
        let inner = std::mem::replace(&mut self.root, Node::Raw(String::new()));
        self.root = container.with_child(inner).into();
    }

    /// Append a stylesheet.
    pub fn push_sheet(&mut self, css: impl Into<String>) {
        let css = css.into();
        if !css.trim().is_empty() {
            self.sheets.push(css);
        }
    }

    /// The container with class `markdown-body`, if a step created it.
    pub fn body_mut(&mut self) -> Option<&mut Element> {
        self.root.find_class_mut(BODY_CLASS)
    }

    /// Serialize as `<style>` followed by the tree.
    pub fn to_html(&self) -> String {
        let tree = self.root.to_html();
        if self.sheets.is_empty() {
            return tree;
        }
        let mut sheet = self.sheets.join("\n");
        if !sheet.ends_with('\n') {
            sheet.push('\n');
        }
        format!("<style>\n{sheet}</style>\n{tree}")
    }
}

/// A single transform over a [`StyledDocument`].
pub trait StyleStep: Send + Sync {
    /// Step name for logging.
    fn name(&self) -> &'static str;

    /// Apply the step. Steps for disabled toggles leave `doc` unchanged.
    fn apply(&self, doc: &mut StyledDocument, theme: &Theme, config: &RenderConfig);
}

/// Style rendered HTML with `theme` and `config`.
///
/// # Example
///
/// ```
/// use mdstyle_renderer::{RenderConfig, apply_styles};
/// use mdstyle_themes::ThemeRegistry;
///
/// let themes = ThemeRegistry::builtin();
/// let config = RenderConfig::default();
/// let html = apply_styles("<p>Hi</p>", themes.resolve(&config.theme), &config);
///
/// assert!(html.starts_with("<style>"));
/// assert!(html.contains(r#"<div class="markdown-body""#));
/// ```
pub fn apply_styles(html: &str, theme: &Theme, config: &RenderConfig) -> String {
    let mut doc = StyledDocument::new(html);
    for step in default_steps() {
        step.apply(&mut doc, theme, config);
        tracing::trace!(step = step.name(), "Applied style step");
    }
    doc.to_html()
}
