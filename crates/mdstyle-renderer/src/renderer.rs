//! `CommonMark` renderer for markdown chunks.
//!
//! A document is rendered as a sequence of markdown chunks separated by
//! extension blocks. One [`MarkdownRenderer`] handles all chunks of a
//! document so heading ids, the heading index and link reference numbers
//! carry over from chunk to chunk.

use std::collections::HashMap;
use std::fmt::Write;

use pulldown_cmark::{BlockQuoteKind, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::code_block::{CodeBlockProcessor, ProcessResult, parse_fence_info};
use crate::state::{CodeBlockState, HeadingState, ImageState, LinkRefState, TableState, TocEntry};
use crate::highlight::highlight_lines;
use crate::util::{escape_body_text, escape_html, heading_level_to_num};

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Text of the first H1 heading.
    pub title: Option<String>,
    /// Heading index in document order.
    pub toc: Vec<TocEntry>,
    /// Faults recovered while rendering.
    pub warnings: Vec<String>,
}

/// Markdown renderer producing HTML.
///
/// # Code Block Processors
///
/// Custom code block processing can be added via [`with_processor`](Self::with_processor).
/// Processors are checked in order; the first returning a non-`PassThrough` result wins.
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    links: LinkRefState,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    pending_attrs: HashMap<String, String>,
    line_numbers: bool,
    line_breaks: bool,
    link_references: bool,
    warnings: Vec<String>,
}

impl MarkdownRenderer {
    /// Create a renderer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            links: LinkRefState::default(),
            processors: Vec::new(),
            pending_attrs: HashMap::new(),
            line_numbers: false,
            line_breaks: false,
            link_references: false,
            warnings: Vec::new(),
        }
    }

    /// Add a code block processor.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Wrap each code block line in `<span class="line">`.
    #[must_use]
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    /// Render single newlines inside paragraphs as `<br>`.
    #[must_use]
    pub fn with_line_breaks(mut self, enabled: bool) -> Self {
        self.line_breaks = enabled;
        self
    }

    /// Number external links and list them in a footer.
    #[must_use]
    pub fn with_link_references(mut self, enabled: bool) -> Self {
        self.link_references = enabled;
        self
    }

    /// Parser options: GFM tables, strikethrough, task lists and
    /// blockquote alerts, plus math spans.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
            | Options::ENABLE_MATH
    }

    /// Render one markdown chunk and return its HTML.
    pub fn render_chunk(&mut self, markdown: &str) -> String {
        for event in Parser::new_ext(markdown, Self::parser_options()) {
            self.process_event(event);
        }
        std::mem::take(&mut self.output)
    }

    /// Record a warning for the document.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Finish the document whose chunks rendered to `html`.
    ///
    /// Appends the link reference footer when enabled.
    pub fn finish(&mut self, mut html: String) -> RenderResult {
        let urls = self.links.take_urls();
        if self.link_references && !urls.is_empty() {
            html.push_str(r#"<section class="link-references"><ol>"#);
            for (i, url) in urls.iter().enumerate() {
                let url = escape_html(url);
                write!(
                    html,
                    r#"<li id="link-ref-{}"><a href="{url}">{url}</a></li>"#,
                    i + 1
                )
                .unwrap();
            }
            html.push_str("</ol></section>\n");
        }

        RenderResult {
            html,
            title: self.heading.take_title(),
            toc: self.heading.take_toc(),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, content: &str) {
        // Markup inside image alt text is dropped.
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::InlineMath(math) => self.math(&math, "$"),
            Event::DisplayMath(math) => self.math(&math, "$$"),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>\n"),
            Event::Rule => self.output.push_str("<hr>\n"),
            Event::TaskListMarker(checked) => {
                let checked = if checked { " checked" } else { "" };
                write!(self.output, r#"<input type="checkbox" disabled{checked}> "#).unwrap();
            }
            Event::FootnoteReference(_) => {
                // Footnotes are an extension rule
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag after we have the ID.
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(Some(kind)) => {
                write!(
                    self.output,
                    r#"<div class="alert alert-{}">"#,
                    alert_kind_name(kind)
                )
                .unwrap();
            }
            Tag::BlockQuote(None) => self.output.push_str("<blockquote>\n"),
            Tag::CodeBlock(kind) => {
                let (lang, attrs) = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => {
                        let (lang, attrs) = parse_fence_info(info);
                        (if lang.is_empty() { None } else { Some(lang) }, attrs)
                    }
                    _ => (None, HashMap::new()),
                };
                self.pending_attrs = attrs;
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>\n"),
                Some(n) => writeln!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>\n"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                self.links.start(&dest_url);
                let mut link = format!(r#"<a href="{}""#, escape_html(&dest_url));
                if !title.is_empty() {
                    write!(link, r#" title="{}""#, escape_html(&title)).unwrap();
                }
                link.push('>');
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the end tag
                self.image.start(dest_url.to_string(), title.to_string());
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>\n"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    writeln!(
                        self.output,
                        r#"<h{level} id="{id}">{}</h{level}>"#,
                        html.trim()
                    )
                    .unwrap();
                }
            }
            TagEnd::BlockQuote(Some(_)) => self.output.push_str("</div>\n"),
            TagEnd::BlockQuote(None) => self.output.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                let attrs = std::mem::take(&mut self.pending_attrs);

                // Try processors in order, fall back to normal code block rendering
                let processed = lang.as_ref().is_some_and(|lang| {
                    self.processors.iter_mut().any(|processor| {
                        match processor.process(lang, &attrs, &content) {
                            ProcessResult::Inline(html) => {
                                self.output.push_str(&html);
                                true
                            }
                            ProcessResult::PassThrough => false,
                        }
                    })
                });

                if !processed {
                    self.code_block(lang.as_deref(), &content);
                }
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                if let Some((src, title, alt)) = self.image.end() {
                    let mut img = format!(
                        r#"<img src="{}" alt="{}""#,
                        escape_html(&src),
                        escape_html(&alt)
                    );
                    if !title.is_empty() {
                        write!(img, r#" title="{}""#, escape_html(&title)).unwrap();
                    }
                    img.push('>');
                    self.push_inline(&img);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>\n"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Link => {
                self.push_inline("</a>");
                if let Some(n) = self.links.end()
                    && self.link_references
                {
                    self.push_inline(&format!(r#"<sup class="link-ref">[{n}]</sup>"#));
                }
            }
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
        }
    }

    fn code_block(&mut self, lang: Option<&str>, content: &str) {
        let class = lang
            .map(|lang| format!(r#" class="language-{}""#, escape_html(lang)))
            .unwrap_or_default();
        write!(self.output, "<pre><code{class}>").unwrap();

        let highlighted = lang
            .filter(|_| !content.is_empty())
            .and_then(|lang| highlight_lines(lang, content));
        if highlighted.is_none() && !self.line_numbers {
            self.output.push_str(&escape_body_text(content));
        } else {
            let body = content.strip_suffix('\n').unwrap_or(content);
            let lines =
                highlighted.unwrap_or_else(|| body.split('\n').map(escape_body_text).collect());
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    self.output.push('\n');
                }
                if self.line_numbers {
                    write!(self.output, r#"<span class="line">{line}</span>"#).unwrap();
                } else {
                    self.output.push_str(line);
                }
            }
            if !self.line_numbers {
                self.output.push('\n');
            }
        }
        self.output.push_str("</code></pre>\n");
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            // Literal dollars must not pair up into formulas later.
            let html = escape_body_text(text).replace('$', "&#36;");
            if self.heading.is_active() {
                self.heading.push_text(text);
            }
            self.push_inline(&html);
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    /// Formula source is kept between its delimiters for the math pass.
    fn math(&mut self, math: &str, delimiter: &str) {
        if self.image.is_active() {
            self.image.push_str(math);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(math);
        }
        self.push_inline(&format!("{delimiter}{}{delimiter}", escape_html(math)));
    }

    fn raw_html(&mut self, html: &str) {
        self.push_inline(html);
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else if self.line_breaks {
            self.push_inline("<br>\n");
        } else {
            self.push_inline("\n");
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn alert_kind_name(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "note",
        BlockQuoteKind::Tip => "tip",
        BlockQuoteKind::Important => "important",
        BlockQuoteKind::Warning => "warning",
        BlockQuoteKind::Caution => "caution",
    }
}
