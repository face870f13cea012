//! Math formula pass: `$$...$$` and `$...$` to `MathML`.
//!
//! Runs over finished HTML. Text inside `<pre>`, `<code>`, `<style>` and
//! `<script>` is never touched, and neither are tags themselves. A formula
//! that fails to convert stays as written.

use std::panic::{self, AssertUnwindSafe};

use latex2mathml::{DisplayStyle, latex_to_mathml};

use crate::util::{panic_message, unescape_html};

/// Elements whose text is copied through untouched.
const OPAQUE: [&str; 4] = ["pre", "code", "style", "script"];

/// Replace formulas in the text of `html` with `MathML`.
///
/// # Example
///
/// ```
/// use mdstyle_renderer::render_math;
///
/// let html = render_math("<p>$x^2$</p><code>$y$</code>");
/// assert!(html.starts_with("<p><math"));
/// assert!(html.ends_with("<code>$y$</code>"));
/// ```
pub fn render_math(html: &str) -> String {
    if !html.contains('$') {
        return html.to_owned();
    }

    let mut out = String::with_capacity(html.len());
    let mut opaque_depth = 0usize;
    let mut pos = 0;

    while pos < html.len() {
        let rest = &html[pos..];
        if !rest.starts_with('<') {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = &rest[..end];
            if opaque_depth == 0 {
                out.push_str(&convert_text(text));
            } else {
                out.push_str(text);
            }
            pos += end;
            continue;
        }

        let Some(tag_end) = rest.find('>') else {
            out.push_str(rest);
            break;
        };
        let tag = &rest[..=tag_end];
        out.push_str(tag);
        pos += tag_end + 1;

        let Some((name, closing)) = tag_name(tag) else {
            continue;
        };
        if !OPAQUE.contains(&name.as_str()) || tag.ends_with("/>") {
            continue;
        }
        if closing {
            opaque_depth = opaque_depth.saturating_sub(1);
        } else if name == "style" || name == "script" {
            // Raw text: copy through the closing tag as is.
            let close = format!("</{name}");
            let body_end = html[pos..]
                .to_ascii_lowercase()
                .find(&close)
                .map_or(html.len(), |i| pos + i);
            out.push_str(&html[pos..body_end]);
            pos = body_end;
        } else {
            opaque_depth += 1;
        }
    }

    out
}

/// Lowercased tag name and whether the tag is a closing tag.
fn tag_name(tag: &str) -> Option<(String, bool)> {
    let inner = tag.strip_prefix('<')?;
    let (inner, closing) = match inner.strip_prefix('/') {
        Some(rest) => (rest, true),
        None => (inner, false),
    };
    let name: String = inner
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();
    (!name.is_empty()).then(|| (name.to_ascii_lowercase(), closing))
}

fn convert_text(text: &str) -> String {
    if !text.contains('$') {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('$') {
        let start = pos + offset;
        out.push_str(&text[pos..start]);
        let rest = &text[start..];

        if let Some(body) = rest.strip_prefix("$$")
            && let Some(end) = body.find("$$")
        {
            let source = &rest[..end + 4];
            let rendered = formula(&body[..end], DisplayStyle::Block);
            out.push_str(rendered.as_deref().unwrap_or(source));
            pos = start + source.len();
            continue;
        }

        let body = &rest[1..];
        match inline_end(body) {
            Some(end) => {
                let source = &rest[..end + 2];
                let rendered = formula(&body[..end], DisplayStyle::Inline);
                out.push_str(rendered.as_deref().unwrap_or(source));
                pos = start + source.len();
            }
            None => {
                out.push('$');
                pos = start + 1;
            }
        }
    }

    out.push_str(&text[pos..]);
    out
}

/// Offset of the closing `$` of an inline formula.
fn inline_end(body: &str) -> Option<usize> {
    if body.starts_with(char::is_whitespace) || body.starts_with('$') {
        return None;
    }
    let end = body.find('$')?;
    let content = &body[..end];
    (!content.is_empty() && !content.ends_with(char::is_whitespace)).then_some(end)
}

/// Convert one formula, or `None` if it is malformed.
fn formula(escaped: &str, style: DisplayStyle) -> Option<String> {
    let latex = unescape_html(escaped);
    if latex.trim().is_empty() || !balanced_braces(&latex) {
        tracing::debug!(formula = %latex, "Leaving malformed formula as text");
        return None;
    }

    match panic::catch_unwind(AssertUnwindSafe(|| latex_to_mathml(&latex, style))) {
        Ok(Ok(mathml)) => Some(mathml),
        Ok(Err(e)) => {
            tracing::debug!(formula = %latex, error = ?e, "Formula conversion failed");
            None
        }
        Err(payload) => {
            tracing::debug!(
                formula = %latex,
                error = %panic_message(&*payload),
                "Formula converter panicked"
            );
            None
        }
    }
}

/// Whether unescaped `{` and `}` pair up.
fn balanced_braces(latex: &str) -> bool {
    let mut depth = 0i32;
    let mut chars = latex.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
