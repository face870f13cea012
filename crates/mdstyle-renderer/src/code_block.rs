//! Code block processors for fenced blocks that are not plain code.
//!
//! Processors are registered with the [`MarkdownRenderer`](crate::MarkdownRenderer)
//! and checked in order when a fenced code block ends. The first processor
//! returning a non-`PassThrough` result wins.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use mdstyle_renderer::{CodeBlockProcessor, MarkdownRenderer, ProcessResult};
//!
//! struct Csv;
//!
//! impl CodeBlockProcessor for Csv {
//!     fn process(
//!         &mut self,
//!         language: &str,
//!         _attrs: &HashMap<String, String>,
//!         source: &str,
//!     ) -> ProcessResult {
//!         if language == "csv" {
//!             ProcessResult::Inline(format!("<table data-rows=\"{}\"></table>", source.lines().count()))
//!         } else {
//!             ProcessResult::PassThrough
//!         }
//!     }
//! }
//!
//! let mut renderer = MarkdownRenderer::new().with_processor(Csv);
//! let html = renderer.render_chunk("```csv\na,b\nc,d\n```");
//! assert_eq!(html, "<table data-rows=\"2\"></table>");
//! ```

use std::collections::HashMap;

use crate::extension::plantuml_image;
use crate::util::escape_html;

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the code block with this HTML.
    Inline(String),
    /// Render as a regular code block.
    PassThrough,
}

/// Trait for processing special code blocks.
pub trait CodeBlockProcessor {
    /// Process a code block.
    ///
    /// # Arguments
    ///
    /// * `language` - Language identifier from fence info string
    /// * `attrs` - Attributes parsed from fence (key=value pairs)
    /// * `source` - Raw content of the code block
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
    ) -> ProcessResult;
}

/// Parse fence info string into language and attributes.
///
/// Format: `language [key=value ...]`
#[must_use]
pub(crate) fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let mut attrs = HashMap::new();
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            let value = value.trim_matches('"').trim_matches('\'');
            attrs.insert(key.to_owned(), value.to_owned());
        }
    }

    (language, attrs)
}

/// Renders diagram fences for display.
///
/// - `plantuml`: an image from the `PlantUML` server, like `@startuml` blocks.
/// - `mermaid`: `<pre class="mermaid">` for client-side rendering.
pub struct DiagramProcessor {
    plantuml_server: String,
}

impl DiagramProcessor {
    /// Create a processor using `plantuml_server` for `PlantUML` images.
    pub fn new(plantuml_server: impl Into<String>) -> Self {
        Self {
            plantuml_server: plantuml_server.into(),
        }
    }
}

impl CodeBlockProcessor for DiagramProcessor {
    fn process(
        &mut self,
        language: &str,
        _attrs: &HashMap<String, String>,
        source: &str,
    ) -> ProcessResult {
        match language {
            "plantuml" | "puml" => {
                let source = source.trim();
                let source = source
                    .strip_prefix("@startuml")
                    .and_then(|s| s.strip_suffix("@enduml"))
                    .map_or(source, str::trim);
                ProcessResult::Inline(plantuml_image(&self.plantuml_server, source))
            }
            "mermaid" => ProcessResult::Inline(format!(
                "<pre class=\"mermaid\">{}</pre>\n",
                escape_html(source.trim_end())
            )),
            _ => ProcessResult::PassThrough,
        }
    }
}
