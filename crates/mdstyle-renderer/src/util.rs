//! Shared text helpers.

use pulldown_cmark_escape::{FmtWriter, escape_html_body_text};

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a text node: only `&`, `<` and `>` are replaced.
#[must_use]
pub(crate) fn escape_body_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    // Writing to a String cannot fail.
    let _ = escape_html_body_text(FmtWriter(&mut result), s);
    result
}

/// Reverse [`escape_html`] plus the numeric forms pulldown-cmark emits.
#[must_use]
pub fn unescape_html(s: &str) -> String {
    if !s.contains('&') {
        return s.to_owned();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Backslash-escape ASCII punctuation so markdown renders `s` literally.
#[must_use]
pub fn escape_markdown(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if c.is_ascii_punctuation() {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Convert text to URL-safe slug.
///
/// Lowercases letters, keeps alphanumerics from any script, and collapses
/// whitespace, dashes and underscores into single dashes. Text with nothing
/// to keep becomes `section`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }
    if result.is_empty() {
        result.push_str("section");
    }

    result
}

/// Message carried by a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}

/// Convert `pulldown_cmark::HeadingLevel` to a number.
pub(crate) fn heading_level_to_num(level: pulldown_cmark::HeadingLevel) -> u8 {
    use pulldown_cmark::HeadingLevel;
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("snake_case"), "snake-case");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("入门 指南"), "入门-指南");
        assert_eq!(slugify("Über Uns"), "über-uns");
    }

    #[test]
    fn test_slugify_empty_fallback() {
        assert_eq!(slugify("???"), "section");
    }

    #[test]
    fn test_escape_body_text() {
        assert_eq!(
            escape_body_text(r#"It's "fine" <b> & more"#),
            r#"It's "fine" &lt;b&gt; &amp; more"#
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_unescape_html() {
        assert_eq!(unescape_html("a &lt; b &amp;&amp; c"), "a < b && c");
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
        assert_eq!(unescape_html(&escape_html(r#"x"'<>&"#)), r#"x"'<>&"#);
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("[a]{b}"), r"\[a\]\{b\}");
        assert_eq!(escape_markdown("plain text"), "plain text");
    }

    #[test]
    fn test_panic_message() {
        let payload = std::panic::catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(panic_message(&*payload), "boom 1");
        let payload = std::panic::catch_unwind(|| panic!("static")).unwrap_err();
        assert_eq!(panic_message(&*payload), "static");
    }

    #[test]
    fn test_heading_level_to_num() {
        use pulldown_cmark::HeadingLevel;
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }
}
