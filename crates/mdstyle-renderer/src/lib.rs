//! Extensible markdown to styled HTML renderer.
//!
//! Rendering runs in four stages:
//! - The [`Lexer`] splits the source into [`Token`]s using the block and
//!   inline rules of an [`ExtensionRegistry`]. Source no rule claims is left
//!   for the `CommonMark` grammar.
//! - Tokens render to HTML: extension tokens through their rule, markdown
//!   chunks through [`MarkdownRenderer`] (pulldown-cmark with GFM).
//! - [`apply_styles`] wraps the HTML in themed containers and prepends the
//!   theme's scoped stylesheet.
//! - [`render_math`] turns `$...$` and `$$...$$` into `MathML`.
//!
//! [`Engine`] runs the whole pass and contains failures: a faulty rule
//! degrades to its escaped source, and a failed pass to a visible error box.
//!
//! # Example
//!
//! ```
//! use mdstyle_renderer::{Engine, FontSize, RenderConfig};
//!
//! let engine = Engine::default();
//! let config = RenderConfig::default()
//!     .with_theme("github")
//!     .with_font_size(FontSize::Large);
//!
//! let output = engine
//!     .render_document("# Notes\n\n[漢字]{かんじ} and ~~old~~ text", &config)
//!     .unwrap();
//!
//! assert_eq!(output.title.as_deref(), Some("Notes"));
//! assert!(output.html.contains("<ruby>漢字<rt>かんじ</rt></ruby>"));
//! assert!(output.html.contains("font-size: 18px;"));
//! ```

mod code_block;
mod config;
mod engine;
pub mod extension;
mod fence;
mod highlight;
mod math;
mod renderer;
mod scan;
mod segment;
mod state;
pub mod style;
mod token;
mod tokenizer;
mod util;

pub use code_block::{CodeBlockProcessor, DiagramProcessor, ProcessResult};
pub use config::{
    DEFAULT_PLANTUML_SERVER, DEFAULT_THEME_COLOR, FontSize, RenderConfig, is_hex_color,
};
pub use engine::{Engine, ReadingStats, RenderError, RenderOutput, WORDS_PER_MINUTE};
pub use extension::{ExtensionRegistry, RenderContext, RenderFault};
pub use math::render_math;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::TocEntry;
pub use style::apply_styles;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
pub use util::{escape_html, slugify};
