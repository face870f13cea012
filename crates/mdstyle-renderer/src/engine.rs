//! Render orchestrator.
//!
//! [`Engine`] drives one pass: tokenize with the extension registry, render
//! tokens to HTML, fill in the table of contents, apply styles, then convert
//! math. It holds no per-render state, so one engine can serve any number of
//! threads.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use mdstyle_themes::ThemeRegistry;

use crate::code_block::DiagramProcessor;
use crate::config::{RenderConfig, is_hex_color};
use crate::extension::{ExtensionRegistry, RenderContext, TOC_PLACEHOLDER, render_toc};
use crate::math::render_math;
use crate::renderer::MarkdownRenderer;
use crate::state::TocEntry;
use crate::style::apply_styles;
use crate::tokenizer::Lexer;
use crate::util::{escape_html, panic_message};

/// Average reading speed used for [`ReadingStats::minutes`].
pub const WORDS_PER_MINUTE: usize = 200;

/// Fault that aborted a render pass.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The pipeline panicked.
    #[error("Render pipeline panicked: {0}")]
    Panicked(String),
    /// The accent color is not a hex color.
    #[error("Invalid theme color '{0}': expected a hex color such as #1e40af")]
    InvalidColor(String),
}

/// Word count and estimated reading time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadingStats {
    /// Words, counting each CJK character as one word.
    pub words: usize,
    /// Minutes at [`WORDS_PER_MINUTE`], rounded up.
    pub minutes: usize,
}

impl ReadingStats {
    /// Compute statistics for markdown source.
    pub fn from_text(text: &str) -> Self {
        let mut words = 0;
        let mut in_word = false;
        for c in text.chars() {
            if is_cjk(c) {
                words += 1;
                in_word = false;
            } else if c.is_alphanumeric() {
                if !in_word {
                    words += 1;
                }
                in_word = true;
            } else if c != '\'' && c != '-' {
                in_word = false;
            }
        }
        Self {
            words,
            minutes: words.div_ceil(WORDS_PER_MINUTE),
        }
    }
}

fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30FF}' | '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{AC00}'..='\u{D7AF}'
    )
}

/// Full result of a render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderOutput {
    /// Styled HTML with embedded stylesheet.
    pub html: String,
    /// Text of the first H1.
    pub title: Option<String>,
    /// Every heading in document order.
    pub toc: Vec<TocEntry>,
    /// Reading statistics of the source.
    pub stats: ReadingStats,
    /// Faults recovered during the pass.
    pub warnings: Vec<String>,
}

/// Markdown to styled HTML renderer.
///
/// # Example
///
/// ```
/// use mdstyle_renderer::{Engine, RenderConfig};
///
/// let engine = Engine::default();
/// let html = engine.render("# Hello\n\n!!! note Heads up\nBody\n!!!", &RenderConfig::default());
///
/// assert!(html.contains(r#"<div class="markdown-content">"#));
/// assert!(html.contains(r#"<div class="alert alert-note">"#));
/// ```
#[derive(Debug)]
pub struct Engine {
    extensions: ExtensionRegistry,
    themes: ThemeRegistry,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ExtensionRegistry::with_defaults(), ThemeRegistry::builtin())
    }
}

impl Engine {
    /// Create an engine from its registries.
    pub fn new(extensions: ExtensionRegistry, themes: ThemeRegistry) -> Self {
        Self { extensions, themes }
    }

    /// Extension rules in use.
    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// Themes in use.
    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    /// Render `text` to styled HTML.
    ///
    /// Whitespace-only input renders to an empty string. A pipeline fault
    /// renders as a visible error box instead of propagating.
    pub fn render(&self, text: &str, config: &RenderConfig) -> String {
        match self.try_render(text, config) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(error = %e, "Render failed");
                error_box(&e.to_string())
            }
        }
    }

    /// Render `text`, returning pipeline faults to the caller.
    pub fn try_render(&self, text: &str, config: &RenderConfig) -> Result<String, RenderError> {
        Ok(self.render_document(text, config)?.html)
    }

    /// Render `text` with title, heading index, statistics and warnings.
    pub fn render_document(
        &self,
        text: &str,
        config: &RenderConfig,
    ) -> Result<RenderOutput, RenderError> {
        if text.trim().is_empty() {
            return Ok(RenderOutput::default());
        }
        if !is_hex_color(config.theme_color.trim()) {
            return Err(RenderError::InvalidColor(config.theme_color.clone()));
        }

        let start = Instant::now();
        let output = panic::catch_unwind(AssertUnwindSafe(|| self.run(text, config)))
            .map_err(|payload| RenderError::Panicked(panic_message(&*payload)))?;

        tracing::debug!(
            bytes = text.len(),
            warnings = output.warnings.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Rendered document"
        );
        Ok(output)
    }

    /// Style already rendered HTML with the configured theme.
    pub fn apply_styles(&self, html: &str, config: &RenderConfig) -> String {
        apply_styles(html, self.themes.resolve(&config.theme), config)
    }

    fn run(&self, text: &str, config: &RenderConfig) -> RenderOutput {
        let mut markdown = MarkdownRenderer::new()
            .with_processor(DiagramProcessor::new(config.plantuml_server.clone()))
            .with_line_numbers(config.code_line_numbers)
            .with_line_breaks(config.line_breaks)
            .with_link_references(config.link_references);

        let tokens = Lexer::new(&self.extensions).tokenize(text);
        let body = RenderContext::new(&self.extensions, config, &mut markdown).render_blocks(&tokens);
        let result = markdown.finish(body);

        let html = if result.html.contains(TOC_PLACEHOLDER) {
            result
                .html
                .replace(TOC_PLACEHOLDER, &render_toc(&result.toc, &config.toc_title))
        } else {
            result.html
        };

        let styled = self.apply_styles(&html, config);

        RenderOutput {
            html: render_math(&styled),
            title: result.title,
            toc: result.toc,
            stats: ReadingStats::from_text(text),
            warnings: result.warnings,
        }
    }
}

/// Visible replacement for a document that failed to render.
fn error_box(message: &str) -> String {
    format!(
        r#"<div class="render-error" style="color: red; padding: 20px; background-color: #ffebee; border: 1px solid red;"><h3>Render error</h3><p>{}</p></div>"#,
        escape_html(message)
    )
}
