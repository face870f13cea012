//! Scoped stylesheet generation.

use std::fmt::Write;

use crate::theme::{Declaration, Theme};

/// Class of the outermost element of every rendered document.
pub const ROOT_CLASS: &str = "markdown-content";

/// Generate the scoped stylesheet for a theme.
///
/// Emits one rule per selector in `theme.block`, scoped under
/// `.markdown-content`, with declarations in theme order. Values are emitted
/// verbatim.
#[must_use]
pub fn generate_css(theme: &Theme) -> String {
    let mut css = String::with_capacity(theme.block.len() * 128);
    for rule in &theme.block {
        css.push_str(&scoped_rule(&rule.selector, &rule.declarations, false));
        css.push('\n');
    }
    css
}

/// Format a single rule scoped under `.markdown-content`.
///
/// Comma-separated selector lists are scoped element by element. With
/// `important`, every declaration is marked `!important`.
#[must_use]
pub fn scoped_rule(selector: &str, declarations: &[Declaration], important: bool) -> String {
    let scoped = selector
        .split(',')
        .map(|s| format!(".{ROOT_CLASS} {}", s.trim()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut css = format!("{scoped} {{");
    let suffix = if important { " !important" } else { "" };
    for decl in declarations {
        write!(css, " {}: {}{suffix};", decl.property, decl.value).unwrap();
    }
    css.push_str(" }");
    css
}
