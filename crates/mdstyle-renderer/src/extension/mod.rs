//! Pluggable grammar rules layered onto the `CommonMark` grammar.
//!
//! # Rule Types
//!
//! - **Block** ([`BlockRule`]): recognized at the start of a line outside code;
//!   consumes one or more whole lines.
//! - **Inline** ([`InlineRule`]): recognized inside the text of markdown
//!   chunks; code spans, math and backslash escapes are opaque to it.
//!
//! # Architecture
//!
//! Rules live in an [`ExtensionRegistry`] built once at startup. The
//! [`Lexer`](crate::Lexer) asks block rules, in registration order, whether a
//! line starts their construct; the first rule whose `parse` succeeds wins
//! and lines no rule claims accumulate into markdown chunks for pulldown-cmark.
//! Inline rules then split each chunk's text into tokens.
//!
//! Block rules render straight to HTML. Inline rules render to inline HTML
//! that is spliced back into the chunk's markdown, so the surrounding
//! markdown (links, code spans) inside an inline construct still renders.
//!
//! # Example
//!
//! ```
//! use mdstyle_renderer::extension::{
//!     BlockRule, ExtensionRegistry, RenderContext, RenderFault,
//! };
//! use mdstyle_renderer::{Engine, Lexer, RenderConfig, Token};
//!
//! struct Banner;
//!
//! impl BlockRule for Banner {
//!     fn name(&self) -> &str { "banner" }
//!
//!     fn recognize(&self, line: &str) -> bool {
//!         line.starts_with(">>> ")
//!     }
//!
//!     fn parse(&self, lines: &[&str], _lexer: &Lexer<'_>) -> Option<(Token, usize)> {
//!         let text = lines[0].strip_prefix(">>> ")?;
//!         Some((Token::extension("banner", "banner", lines[0]).with_attr("text", text), 1))
//!     }
//!
//!     fn render(&self, token: &Token, _ctx: &mut RenderContext<'_>) -> Result<String, RenderFault> {
//!         Ok(format!("<header>{}</header>", token.attr("text").unwrap_or_default()))
//!     }
//! }
//!
//! let registry = ExtensionRegistry::with_defaults().with_block(Banner);
//! let engine = Engine::new(registry, Default::default());
//! let html = engine.render(">>> Hello", &RenderConfig::default());
//! assert!(html.contains("<header>Hello</header>"));
//! ```

mod alert;
mod context;
mod footnote;
mod markup;
mod plantuml;
mod registry;
mod ruby;
mod slider;
mod toc;

pub use alert::AlertRule;
pub use context::RenderContext;
pub use footnote::{FootnoteDefinitionRule, FootnoteReferenceRule};
pub use markup::DelimiterRule;
pub(crate) use plantuml::plantuml_image;
pub use plantuml::{PlantUmlRule, plantuml_url};
pub use registry::ExtensionRegistry;
pub use ruby::RubyRule;
pub use slider::SliderRule;
pub use toc::{TOC_PLACEHOLDER, TocRule, render_toc};

use crate::Lexer;
use crate::token::Token;

/// Level at which a rule applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Whole lines.
    Block,
    /// Spans inside text.
    Inline,
}

/// A rule's render step failed.
///
/// Recovered at the token level: the token's source is shown escaped in
/// place of its HTML.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{rule}: {message}")]
pub struct RenderFault {
    /// Name of the failing rule.
    pub rule: String,
    /// What went wrong.
    pub message: String,
}

impl RenderFault {
    /// Create a fault for `rule`.
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Block-level grammar rule.
///
/// Rules must be deterministic and free of side effects: the same lines
/// always recognize, parse and render the same way.
pub trait BlockRule: Send + Sync {
    /// Rule name. Names share one namespace across both levels.
    fn name(&self) -> &str;

    /// Cheap check whether `line` can start this construct.
    fn recognize(&self, line: &str) -> bool;

    /// Parse the construct starting at `lines[0]`.
    ///
    /// Returns the token and the number of lines consumed (at least one),
    /// or `None` when the lines do not form the construct after all.
    fn parse(&self, lines: &[&str], lexer: &Lexer<'_>) -> Option<(Token, usize)>;

    /// Render a token produced by [`parse`](Self::parse).
    fn render(&self, token: &Token, ctx: &mut RenderContext<'_>) -> Result<String, RenderFault>;

    /// Opening and closing markup wrapped around a run of consecutive tokens
    /// from this rule.
    fn group(&self) -> Option<(&'static str, &'static str)> {
        None
    }
}

/// Inline-level grammar rule.
pub trait InlineRule: Send + Sync {
    /// Rule name. Names share one namespace across both levels.
    fn name(&self) -> &str;

    /// Byte offset of the first position in `src` where this rule may match.
    fn start(&self, src: &str) -> Option<usize>;

    /// Parse the construct at the start of `src`.
    ///
    /// The returned token's `raw` must be the exact prefix of `src` it
    /// consumed. Nested inline content should be lexed with
    /// [`Lexer::inline`].
    fn parse(&self, src: &str, lexer: &Lexer<'_>) -> Option<Token>;

    /// Render a token to inline HTML.
    ///
    /// The output is spliced back into markdown, so literal text that must not
    /// be read as markdown has to be escaped.
    fn render(&self, token: &Token, ctx: &mut RenderContext<'_>) -> Result<String, RenderFault>;
}

/// A registered rule of either level.
pub enum Extension {
    /// Block-level rule.
    Block(Box<dyn BlockRule>),
    /// Inline-level rule.
    Inline(Box<dyn InlineRule>),
}

impl Extension {
    /// Rule name.
    pub fn name(&self) -> &str {
        match self {
            Self::Block(rule) => rule.name(),
            Self::Inline(rule) => rule.name(),
        }
    }

    /// Rule level.
    pub fn level(&self) -> Level {
        match self {
            Self::Block(_) => Level::Block,
            Self::Inline(_) => Level::Inline,
        }
    }
}

impl std::fmt::Debug for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name())
            .field("level", &self.level())
            .finish()
    }
}
