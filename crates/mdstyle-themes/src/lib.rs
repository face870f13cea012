//! Theme table for mdstyle.
//!
//! A [`Theme`] is a named style bundle: base typography applied to the whole
//! document plus an ordered list of per-selector rules. Themes live in a
//! [`ThemeRegistry`], which ships with the built-in themes and accepts custom
//! ones at startup.
//!
//! # Example
//!
//! ```
//! use mdstyle_themes::{ThemeRegistry, generate_css};
//!
//! let themes = ThemeRegistry::builtin();
//! let theme = themes.resolve("github");
//! let css = generate_css(theme);
//!
//! assert!(css.contains(".markdown-content h1 {"));
//! ```

mod builtin;
mod css;
mod registry;
mod theme;

pub use css::{ROOT_CLASS, generate_css, scoped_rule};
pub use registry::{DEFAULT_THEME, ThemeRegistry};
pub use theme::{Declaration, REQUIRED_SELECTORS, Rule, Theme};
