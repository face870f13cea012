//! Built-in theme table.

use crate::theme::Theme;

type Decls = &'static [(&'static str, &'static str)];

struct Builtin {
    id: &'static str,
    name: &'static str,
    base: Decls,
    block: &'static [(&'static str, Decls)],
}

impl Builtin {
    fn to_theme(&self) -> Theme {
        let mut theme = Theme::new(self.id, self.name);
        for (property, value) in self.base {
            theme = theme.with_base(property, value);
        }
        for (selector, decls) in self.block {
            for (property, value) in *decls {
                theme.set_rule_declaration(selector, property, value);
            }
        }
        theme
    }
}

/// Theme aliases (alias, target).
pub(crate) const ALIASES: [(&str, &str); 2] =
    [("classic", "doocs_classic"), ("elegant", "doocs_elegant")];

/// Build all built-in themes in display order.
pub(crate) fn themes() -> Vec<Theme> {
    BUILTINS.iter().map(Builtin::to_theme).collect()
}

const MONO: &str = "ui-monospace, SFMono-Regular, SF Mono, Menlo, Consolas, Liberation Mono, monospace";
const COURIER: &str = r#""Courier New", Courier, monospace"#;

const BUILTINS: &[Builtin] = &[
    Builtin {
        id: "default",
        name: "Default",
        base: &[
            (
                "font-family",
                r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif"#,
            ),
            ("font-size", "16px"),
            ("line-height", "1.6"),
            ("color", "#333"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "2em"),
                    ("color", "#2c3e50"),
                    ("margin-top", "1.5em"),
                    ("margin-bottom", "0.5em"),
                    ("border-bottom", "2px solid #333333"),
                    ("padding-bottom", "0.3em"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "1.5em"),
                    ("color", "#2c3e50"),
                    ("margin-top", "1.5em"),
                    ("margin-bottom", "0.5em"),
                    ("border-bottom", "1px solid #eee"),
                    ("padding-bottom", "0.3em"),
                ],
            ),
            ("p", &[("margin", "1em 0")]),
            (
                "blockquote",
                &[
                    ("border-left", "4px solid #333333"),
                    ("padding-left", "1em"),
                    ("margin", "1em 0"),
                    ("color", "#666"),
                    ("background-color", "#f8f9fa"),
                ],
            ),
            (
                "pre",
                &[
                    ("background-color", "#f1f1f1"),
                    ("padding", "1em"),
                    ("border-radius", "5px"),
                    ("overflow-x", "auto"),
                ],
            ),
            (
                "code",
                &[
                    ("background-color", "#f1f1f1"),
                    ("padding", "0.2em 0.4em"),
                    ("border-radius", "3px"),
                    ("font-family", COURIER),
                ],
            ),
            (
                "table",
                &[
                    ("border-collapse", "collapse"),
                    ("width", "100%"),
                    ("margin", "1em 0"),
                ],
            ),
            (
                "th",
                &[
                    ("background-color", "#f2f2f2"),
                    ("border", "1px solid #ddd"),
                    ("padding", "8px"),
                    ("text-align", "left"),
                ],
            ),
            (
                "td",
                &[
                    ("border", "1px solid #ddd"),
                    ("padding", "8px"),
                    ("text-align", "left"),
                ],
            ),
        ],
    },
    Builtin {
        id: "clean",
        name: "Clean",
        base: &[
            ("font-family", r#""Helvetica Neue", Arial, sans-serif"#),
            ("font-size", "16px"),
            ("line-height", "1.6"),
            ("color", "#333"),
            ("background-color", "#ffffff"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "2.2em"),
                    ("color", "#000"),
                    ("margin-top", "1.8em"),
                    ("margin-bottom", "0.6em"),
                    ("border-bottom", "1px solid #e5e5e5"),
                    ("padding-bottom", "0.3em"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "1.8em"),
                    ("color", "#000"),
                    ("margin-top", "1.5em"),
                    ("margin-bottom", "0.5em"),
                ],
            ),
            ("p", &[("margin", "1.2em 0")]),
            (
                "blockquote",
                &[
                    ("border-left", "3px solid #e5e5e5"),
                    ("padding-left", "1em"),
                    ("margin", "1em 0"),
                    ("color", "#666"),
                    ("font-style", "italic"),
                ],
            ),
            (
                "pre",
                &[
                    ("background-color", "#f5f5f5"),
                    ("padding", "1em"),
                    ("border-radius", "4px"),
                    ("overflow-x", "auto"),
                ],
            ),
            (
                "code",
                &[
                    ("background-color", "#f5f5f5"),
                    ("padding", "0.2em 0.4em"),
                    ("border-radius", "3px"),
                    ("font-family", COURIER),
                ],
            ),
        ],
    },
    Builtin {
        id: "modern",
        name: "Modern",
        base: &[
            (
                "font-family",
                r#""Inter", -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif"#,
            ),
            ("font-size", "16px"),
            ("line-height", "1.7"),
            ("color", "#2d3748"),
            ("background-color", "#f7fafc"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "2.5em"),
                    ("color", "#333333"),
                    ("margin-top", "1.8em"),
                    ("margin-bottom", "0.8em"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "2em"),
                    ("color", "#1a202c"),
                    ("margin-top", "1.5em"),
                    ("margin-bottom", "0.8em"),
                    ("border-bottom", "2px solid #333333"),
                    ("padding-bottom", "0.5em"),
                ],
            ),
            ("p", &[("margin", "1.5em 0")]),
            (
                "blockquote",
                &[
                    ("border-left", "4px solid #333333"),
                    ("padding", "1em 1.5em"),
                    ("margin", "1.5em 0"),
                    ("color", "#4a5568"),
                    ("background-color", "#f5f5f5"),
                    ("border-radius", "0 6px 6px 0"),
                ],
            ),
            (
                "pre",
                &[
                    ("background-color", "#edf2f7"),
                    ("padding", "1.5em"),
                    ("border-radius", "8px"),
                    ("overflow-x", "auto"),
                ],
            ),
            (
                "code",
                &[
                    ("background-color", "#edf2f7"),
                    ("padding", "0.2em 0.5em"),
                    ("border-radius", "6px"),
                    ("font-family", r#""Fira Code", "Courier New", Courier, monospace"#),
                ],
            ),
        ],
    },
    Builtin {
        id: "book",
        name: "Book",
        base: &[
            ("font-family", r#""Georgia", "Times New Roman", Times, serif"#),
            ("font-size", "16px"),
            ("line-height", "1.8"),
            ("color", "#333"),
            ("background-color", "#faf9f6"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "2.5em"),
                    ("color", "#222"),
                    ("text-align", "center"),
                    ("margin-bottom", "1.5em"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "2em"),
                    ("color", "#222"),
                    ("margin-top", "2.5em"),
                    ("margin-bottom", "1em"),
                ],
            ),
            ("p", &[("margin", "1.5em 0"), ("text-align", "justify")]),
            (
                "blockquote",
                &[
                    ("border-left", "3px solid #ccc"),
                    ("padding", "1em 1.5em"),
                    ("margin", "2em 0"),
                    ("color", "#555"),
                    ("font-style", "italic"),
                ],
            ),
            (
                "pre",
                &[
                    ("background-color", "#f0f0f0"),
                    ("padding", "1.2em"),
                    ("border-radius", "5px"),
                    ("overflow-x", "auto"),
                    ("margin", "2em 0"),
                ],
            ),
            (
                "code",
                &[
                    ("background-color", "#f0f0f0"),
                    ("padding", "0.2em 0.4em"),
                    ("border-radius", "3px"),
                    ("font-family", COURIER),
                ],
            ),
        ],
    },
    Builtin {
        id: "docs",
        name: "Docs",
        base: &[
            (
                "font-family",
                r#""Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif"#,
            ),
            ("font-size", "16px"),
            ("line-height", "1.6"),
            ("color", "#24292f"),
            ("background-color", "#ffffff"),
        ],
        block: GITHUB_LIKE_BLOCK_DOCS,
    },
    Builtin {
        id: "tech_blue",
        name: "Tech Blue",
        base: &[
            ("font-family", r#""Roboto", "Segoe UI", sans-serif"#),
            ("font-size", "16px"),
            ("line-height", "1.6"),
            ("color", "#333"),
            ("background-color", "#f0f4f8"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "2.2em"),
                    ("color", "#0d47a1"),
                    ("margin-top", "1.5em"),
                    ("margin-bottom", "0.5em"),
                    ("border-bottom", "2px solid #0d47a1"),
                    ("padding-bottom", "0.3em"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "1.8em"),
                    ("color", "#0d47a1"),
                    ("margin-top", "1.5em"),
                    ("margin-bottom", "0.5em"),
                    ("border-bottom", "1px solid #bbdefb"),
                    ("padding-bottom", "0.3em"),
                ],
            ),
            ("p", &[("margin", "1em 0")]),
            (
                "blockquote",
                &[
                    ("border-left", "4px solid #1976d2"),
                    ("padding-left", "1em"),
                    ("background-color", "#e3f2fd"),
                    ("padding", "1em"),
                    ("border-radius", "0 4px 4px 0"),
                    ("color", "#546e7a"),
                    ("margin", "1.5em 0"),
                ],
            ),
            (
                "pre",
                &[
                    ("background-color", "#263238"),
                    ("color", "#eceff1"),
                    ("padding", "1.2em"),
                    ("border-radius", "8px"),
                    ("overflow-x", "auto"),
                    ("box-shadow", "0 4px 6px rgba(0,0,0,0.1)"),
                ],
            ),
            (
                "code",
                &[
                    ("font-family", r#""Consolas", "Monaco", monospace"#),
                    ("background-color", "#e3f2fd"),
                    ("color", "#0d47a1"),
                    ("padding", "0.2em 0.4em"),
                    ("border-radius", "4px"),
                    ("font-size", "0.9em"),
                ],
            ),
        ],
    },
    Builtin {
        id: "dark_mode",
        name: "Dark Mode",
        base: &[
            (
                "font-family",
                r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif"#,
            ),
            ("font-size", "16px"),
            ("line-height", "1.6"),
            ("color", "#e0e0e0"),
            ("background-color", "#1e1e1e"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "2.2em"),
                    ("color", "#90caf9"),
                    ("margin-top", "1.5em"),
                    ("margin-bottom", "0.5em"),
                    ("border-bottom", "1px solid #424242"),
                    ("padding-bottom", "0.3em"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "1.8em"),
                    ("color", "#90caf9"),
                    ("margin-top", "1.5em"),
                    ("margin-bottom", "0.5em"),
                ],
            ),
            ("p", &[("margin", "1em 0")]),
            (
                "blockquote",
                &[
                    ("border-left", "4px solid #64b5f6"),
                    ("padding-left", "1em"),
                    ("color", "#bdbdbd"),
                    ("background-color", "#263238"),
                    ("padding", "1em"),
                    ("border-radius", "4px"),
                    ("margin", "1.5em 0"),
                ],
            ),
            (
                "pre",
                &[
                    ("background-color", "#121212"),
                    ("padding", "1.2em"),
                    ("border-radius", "8px"),
                    ("border", "1px solid #333"),
                    ("overflow-x", "auto"),
                ],
            ),
            (
                "code",
                &[
                    ("font-family", r#""Fira Code", monospace"#),
                    ("background-color", "#333"),
                    ("padding", "0.2em 0.4em"),
                    ("border-radius", "4px"),
                    ("color", "#ffcc80"),
                ],
            ),
        ],
    },
    Builtin {
        id: "github",
        name: "GitHub",
        base: &[
            (
                "font-family",
                r#"-apple-system, BlinkMacSystemFont, "Segoe UI", "Noto Sans", Helvetica, Arial, sans-serif, "Apple Color Emoji", "Segoe UI Emoji""#,
            ),
            ("font-size", "16px"),
            ("line-height", "1.5"),
            ("word-wrap", "break-word"),
            ("color", "#24292f"),
            ("background-color", "#ffffff"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "2em"),
                    ("color", "#24292f"),
                    ("margin-top", "24px"),
                    ("margin-bottom", "16px"),
                    ("font-weight", "600"),
                    ("line-height", "1.25"),
                    ("padding-bottom", "0.3em"),
                    ("border-bottom", "1px solid #d0d7de"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "1.5em"),
                    ("color", "#24292f"),
                    ("margin-top", "24px"),
                    ("margin-bottom", "16px"),
                    ("font-weight", "600"),
                    ("line-height", "1.25"),
                    ("padding-bottom", "0.3em"),
                    ("border-bottom", "1px solid #d0d7de"),
                ],
            ),
            GITHUB_P,
            GITHUB_BLOCKQUOTE,
            GITHUB_PRE,
            GITHUB_CODE,
        ],
    },
    Builtin {
        id: "wechat",
        name: "WeChat",
        base: &[
            (
                "font-family",
                r#"-apple-system, BlinkMacSystemFont, "PingFang SC", "Hiragino Sans GB", "Microsoft YaHei", "Helvetica Neue", Arial, sans-serif"#,
            ),
            ("font-size", "16px"),
            ("line-height", "1.6"),
            ("color", "#333"),
            ("background-color", "#fff"),
            ("text-align", "justify"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "22px"),
                    ("color", "#333"),
                    ("text-align", "center"),
                    ("margin-bottom", "16px"),
                    ("border-bottom", "2px solid #07c160"),
                    ("padding-bottom", "10px"),
                    ("font-weight", "bold"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "18px"),
                    ("color", "#333"),
                    ("border-left", "4px solid #07c160"),
                    ("padding-left", "10px"),
                    ("margin-top", "2em"),
                    ("font-weight", "bold"),
                ],
            ),
            ("p", &[("margin-bottom", "1.2em"), ("letter-spacing", "0.05em")]),
            (
                "blockquote",
                &[
                    ("border-left", "4px solid #07c160"),
                    ("background-color", "#f8f8f8"),
                    ("padding", "15px"),
                    ("margin", "1.5em 0"),
                    ("color", "#555"),
                    ("border-radius", "4px"),
                    ("font-size", "15px"),
                ],
            ),
            (
                "pre",
                &[
                    ("background", "#f8f8f8"),
                    ("color", "#333"),
                    ("padding", "15px"),
                    ("border-radius", "8px"),
                    ("overflow-x", "auto"),
                    ("position", "relative"),
                    ("margin", "1.5em 0"),
                    ("font-family", r#""Fira Code", Consolas, monospace"#),
                    ("line-height", "1.5"),
                    ("box-shadow", "0 4px 12px rgba(0,0,0,0.1)"),
                ],
            ),
            (
                "code",
                &[
                    ("background-color", "#f0f0f0"),
                    ("padding", "2px 4px"),
                    ("border-radius", "3px"),
                    ("color", "#d63200"),
                    ("font-size", "14px"),
                    ("font-family", "Consolas, monospace"),
                ],
            ),
        ],
    },
    Builtin {
        id: "xiaohongshu",
        name: "Xiaohongshu",
        base: &[
            (
                "font-family",
                r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Oxygen, "Helvetica Neue", Arial, sans-serif"#,
            ),
            ("line-height", "1.8"),
            ("word-wrap", "break-word"),
            ("overflow-wrap", "break-word"),
            ("color", "#333"),
            ("background-color", "#fff"),
            ("text-align", "left"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "24px"),
                    ("font-weight", "bold"),
                    ("margin-bottom", "16px"),
                    ("color", "#333"),
                    ("text-align", "center"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "20px"),
                    ("font-weight", "bold"),
                    ("margin", "20px 0 12px 0"),
                    ("color", "#444"),
                ],
            ),
            ("p", &[("margin-bottom", "12px"), ("color", "#222")]),
            (
                "blockquote",
                &[
                    ("margin", "16px 0"),
                    ("padding", "12px 16px"),
                    ("background-color", "#f8f9fa"),
                    ("border-left", "4px solid #e91e63"),
                    ("border-radius", "4px"),
                    ("font-style", "italic"),
                    ("color", "#666"),
                ],
            ),
            (
                "pre",
                &[
                    ("background-color", "#f8f9fa"),
                    ("padding", "16px"),
                    ("border-radius", "8px"),
                    ("overflow-x", "auto"),
                    ("margin", "16px 0"),
                    ("border", "1px solid #e9ecef"),
                ],
            ),
            (
                "code",
                &[
                    ("background-color", "#f1f3f4"),
                    ("padding", "2px 6px"),
                    ("border-radius", "4px"),
                    ("font-family", r#""Courier New", monospace"#),
                    ("font-size", "0.9em"),
                    ("color", "#d63384"),
                ],
            ),
        ],
    },
    Builtin {
        id: "doocs_classic",
        name: "Doocs Classic",
        base: &[
            (
                "font-family",
                r#"-apple-system, BlinkMacSystemFont, "Segoe UI", "PingFang SC", "Hiragino Sans GB", "Microsoft YaHei", "Helvetica Neue", Arial, sans-serif"#,
            ),
            ("font-size", "16px"),
            ("line-height", "1.8"),
            ("color", "#333"),
            ("background-color", "#ffffff"),
            ("text-align", "justify"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "28px"),
                    ("font-weight", "bold"),
                    ("margin", "48px 0 24px 0"),
                    ("color", "#2c3e50"),
                    ("text-align", "center"),
                    ("padding-bottom", "12px"),
                    ("border-bottom", "2px solid #eaecef"),
                    ("line-height", "1.3"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "24px"),
                    ("font-weight", "bold"),
                    ("margin", "36px 0 18px 0"),
                    ("color", "#34495e"),
                    ("padding-bottom", "8px"),
                    ("border-bottom", "1px solid #eaecef"),
                    ("line-height", "1.3"),
                ],
            ),
            ("h3", MINOR_20_32),
            ("h4", MINOR_18_28),
            ("h5", MINOR_16_24),
            ("h6", MINOR_14_20),
            (
                "p",
                &[
                    ("margin", "16px 0"),
                    ("text-indent", "2em"),
                    ("line-height", "1.8"),
                ],
            ),
            (
                "blockquote",
                &[
                    ("margin", "20px 0"),
                    ("padding", "15px 20px"),
                    ("background-color", "#f8f9fa"),
                    ("border-left", "4px solid #333333"),
                    ("border-radius", "4px"),
                    ("color", "#666"),
                    ("font-size", "15px"),
                ],
            ),
            (
                "pre",
                &[
                    ("margin", "20px 0"),
                    ("padding", "16px"),
                    ("background-color", "#f6f8fa"),
                    ("border-radius", "6px"),
                    ("overflow-x", "auto"),
                    ("font-size", "14px"),
                    ("line-height", "1.5"),
                    ("box-shadow", "0 2px 4px rgba(0,0,0,0.1)"),
                ],
            ),
            (
                "code",
                &[
                    ("padding", "0.2em 0.4em"),
                    ("margin", "0"),
                    ("font-size", "0.9em"),
                    ("background-color", "#f1f3f4"),
                    ("border-radius", "3px"),
                    ("font-family", MONO),
                ],
            ),
            (
                "table",
                &[
                    ("width", "100%"),
                    ("border-collapse", "collapse"),
                    ("margin", "20px 0"),
                    ("font-size", "14px"),
                ],
            ),
            (
                "th",
                &[
                    ("background-color", "#f8f9fa"),
                    ("border", "1px solid #e0e0e0"),
                    ("padding", "10px"),
                    ("text-align", "left"),
                    ("font-weight", "bold"),
                ],
            ),
            (
                "td",
                &[
                    ("border", "1px solid #e0e0e0"),
                    ("padding", "10px"),
                    ("text-align", "left"),
                ],
            ),
            (
                "img",
                &[
                    ("max-width", "100%"),
                    ("height", "auto"),
                    ("border-radius", "4px"),
                    ("margin", "16px 0"),
                ],
            ),
        ],
    },
    Builtin {
        id: "doocs_elegant",
        name: "Doocs Elegant",
        base: &[
            (
                "font-family",
                r#""Georgia", "Times New Roman", "Microsoft YaHei", serif"#,
            ),
            ("font-size", "16px"),
            ("line-height", "1.9"),
            ("color", "#333"),
            ("background-color", "#faf9f6"),
            ("text-align", "justify"),
        ],
        block: &[
            (
                "h1",
                &[
                    ("font-size", "30px"),
                    ("font-weight", "bold"),
                    ("margin", "52px 0 26px 0"),
                    ("color", "#2c3e50"),
                    ("text-align", "center"),
                    ("font-style", "italic"),
                    ("padding-bottom", "14px"),
                    ("border-bottom", "2px solid #eaecef"),
                    ("line-height", "1.3"),
                ],
            ),
            (
                "h2",
                &[
                    ("font-size", "26px"),
                    ("font-weight", "bold"),
                    ("margin", "40px 0 20px 0"),
                    ("color", "#34495e"),
                    ("border-bottom", "1px solid #eaecef"),
                    ("padding-bottom", "10px"),
                    ("line-height", "1.3"),
                ],
            ),
            ("h3", MINOR_22_36),
            ("h4", MINOR_20_32),
            ("h5", MINOR_18_28),
            ("h6", MINOR_16_24),
            (
                "p",
                &[
                    ("margin", "18px 0"),
                    ("text-indent", "2em"),
                    ("line-height", "1.9"),
                ],
            ),
            (
                "blockquote",
                &[
                    ("margin", "24px 0"),
                    ("padding", "20px 24px"),
                    ("background-color", "#f5f5f5"),
                    ("border-left", "4px solid #95a5a6"),
                    ("border-radius", "4px"),
                    ("color", "#7f8c8d"),
                    ("font-style", "italic"),
                    ("font-size", "15px"),
                ],
            ),
            (
                "pre",
                &[
                    ("margin", "24px 0"),
                    ("padding", "18px"),
                    ("background-color", "#ecf0f1"),
                    ("border-radius", "6px"),
                    ("overflow-x", "auto"),
                    ("font-size", "14px"),
                    ("line-height", "1.5"),
                ],
            ),
            (
                "code",
                &[
                    ("padding", "0.2em 0.4em"),
                    ("margin", "0"),
                    ("font-size", "0.9em"),
                    ("background-color", "#ecf0f1"),
                    ("border-radius", "3px"),
                    ("font-family", COURIER),
                ],
            ),
        ],
    },
];

/// Minor heading rule shared by the doocs themes.
const fn heading(size: &'static str, margin: &'static str) -> [(&'static str, &'static str); 5] {
    [
        ("font-size", size),
        ("font-weight", "bold"),
        ("margin", margin),
        ("color", "#34495e"),
        ("line-height", "1.3"),
    ]
}

const MINOR_20_32: Decls = &heading("20px", "32px 0 16px 0");
const MINOR_18_28: Decls = &heading("18px", "28px 0 14px 0");
const MINOR_16_24: Decls = &heading("16px", "24px 0 12px 0");
const MINOR_14_20: Decls = &heading("14px", "20px 0 10px 0");
const MINOR_22_36: Decls = &heading("22px", "36px 0 18px 0");

const GITHUB_P: (&str, Decls) = ("p", &[("margin-top", "0"), ("margin-bottom", "16px")]);

const GITHUB_BLOCKQUOTE: (&str, Decls) = (
    "blockquote",
    &[
        ("padding", "0 1em"),
        ("color", "#57606a"),
        ("border-left", "0.25em solid #d0d7de"),
        ("margin", "0 0 16px 0"),
    ],
);

const GITHUB_PRE: (&str, Decls) = (
    "pre",
    &[
        ("padding", "16px"),
        ("overflow", "auto"),
        ("font-size", "85%"),
        ("line-height", "1.45"),
        ("background-color", "#f6f8fa"),
        ("border-radius", "6px"),
        ("margin-bottom", "16px"),
    ],
);

const GITHUB_CODE: (&str, Decls) = (
    "code",
    &[
        ("padding", "0.2em 0.4em"),
        ("margin", "0"),
        ("font-size", "85%"),
        ("background-color", "#afb8c133"),
        ("border-radius", "6px"),
        ("font-family", MONO),
    ],
);

const GITHUB_LIKE_BLOCK_DOCS: &[(&str, Decls)] = &[
    (
        "h1",
        &[
            ("font-size", "2em"),
            ("color", "#24292f"),
            ("padding-bottom", "0.3em"),
            ("border-bottom", "1px solid #d0d7de"),
        ],
    ),
    (
        "h2",
        &[
            ("font-size", "1.5em"),
            ("color", "#24292f"),
            ("padding-bottom", "0.3em"),
            ("border-bottom", "1px solid #d0d7de"),
        ],
    ),
    GITHUB_P,
    GITHUB_BLOCKQUOTE,
    GITHUB_PRE,
    GITHUB_CODE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::REQUIRED_SELECTORS;

    #[test]
    fn test_builtin_ids_unique() {
        let themes = themes();
        let mut ids: Vec<_> = themes.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), themes.len());
    }

    #[test]
    fn test_builtins_define_required_selectors() {
        for theme in themes() {
            for selector in REQUIRED_SELECTORS {
                assert!(
                    theme.rule(selector).is_some(),
                    "{} is missing {selector}",
                    theme.id
                );
            }
        }
    }

    #[test]
    fn test_aliases_point_at_builtins() {
        let themes = themes();
        for (_, target) in ALIASES {
            assert!(themes.iter().any(|t| t.id == target));
        }
    }

    #[test]
    fn test_doocs_minor_headings() {
        let themes = themes();
        let classic = themes.iter().find(|t| t.id == "doocs_classic").unwrap();
        let h4 = classic.rule("h4").unwrap();
        assert_eq!(h4.declarations[0].value, "18px");
        assert_eq!(h4.declarations[2].value, "28px 0 14px 0");
    }
}
