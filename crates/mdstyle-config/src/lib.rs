//! Configuration management for mdstyle.
//!
//! Parses `mdstyle.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! theme = "github"
//! font_size = "large"
//! theme_color = "#0f766e"
//! code_line_numbers = true
//!
//! [plantuml]
//! server = "${PLANTUML_SERVER:-https://www.plantuml.com/plantuml}"
//!
//! [themes.paper]
//! name = "Paper"
//!
//! [themes.paper.base]
//! color = "#222"
//!
//! [themes.paper.block.h1]
//! font-size = "2em"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `plantuml.server` supports `${VAR}` and `${VAR:-default}`.

mod expand;
mod themes;

use std::path::{Path, PathBuf};

use mdstyle_renderer::{FontSize, RenderConfig, is_hex_color};
use mdstyle_themes::{Theme, ThemeRegistry};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override theme id.
    pub theme: Option<String>,
    /// Override font family.
    pub font: Option<String>,
    /// Override font size tier.
    pub font_size: Option<String>,
    /// Override accent color.
    pub theme_color: Option<String>,
    /// Override `PlantUML` server URL.
    pub plantuml_server: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdstyle.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Render settings.
    pub render: RenderSettings,
    /// `PlantUML` settings.
    pub plantuml: PlantUmlConfig,
    /// Custom themes, validated into [`Theme`]s by [`Config::themes`].
    themes: toml::Table,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[render]` section. Unset keys keep [`RenderConfig`] defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Theme id.
    pub theme: Option<String>,
    /// Font family.
    pub font: Option<String>,
    /// Font size tier name.
    pub font_size: Option<String>,
    /// Accent color.
    pub theme_color: Option<String>,
    /// Rounded, shadowed code blocks.
    pub mac_code_block: Option<bool>,
    /// Code block line numbers.
    pub code_line_numbers: Option<bool>,
    /// Paragraph first-line indent.
    pub paragraph_indent: Option<bool>,
    /// Justified paragraphs.
    pub paragraph_justify: Option<bool>,
    /// External link reference footer.
    pub link_references: Option<bool>,
    /// Single newlines become line breaks.
    pub line_breaks: Option<bool>,
    /// Title of the `[[toc]]` block.
    pub toc_title: Option<String>,
}

/// `[plantuml]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantUmlConfig {
    /// `PlantUML` server base URL.
    pub server: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`plantuml.server`").
        field: String,
        /// Error message.
        message: String,
    },
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require `#rgb` or `#rrggbb`.
fn require_color(color: &str, field: &str) -> Result<(), ConfigError> {
    let len = color.len();
    if !is_hex_color(color) || !(len == 4 || len == 7) {
        return Err(ConfigError::Validation(format!(
            "{field} must be a hex color like #rgb or #rrggbb, got '{color}'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdstyle.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(theme) = &settings.theme {
            self.render.theme = Some(theme.clone());
        }
        if let Some(font) = &settings.font {
            self.render.font = Some(font.clone());
        }
        if let Some(font_size) = &settings.font_size {
            self.render.font_size = Some(font_size.clone());
        }
        if let Some(theme_color) = &settings.theme_color {
            self.render.theme_color = Some(theme_color.clone());
        }
        if let Some(server) = &settings.plantuml_server {
            self.plantuml.server = Some(server.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_from(&std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref server) = self.plantuml.server {
            self.plantuml.server = Some(expand::expand_env(server, "plantuml.server")?);
        }
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Called by [`load`](Self::load) after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref color) = self.render.theme_color {
            require_color(color.trim(), "render.theme_color")?;
        }
        if let Some(ref server) = self.plantuml.server {
            require_http_url(server, "plantuml.server")?;
        }
        self.themes()?;
        Ok(())
    }

    /// Render configuration with file and CLI values over the defaults.
    pub fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::default();
        let render = &self.render;

        if let Some(theme) = &render.theme {
            config.theme.clone_from(theme);
        }
        if let Some(font) = &render.font {
            config.font.clone_from(font);
        }
        if let Some(font_size) = &render.font_size {
            config.font_size = FontSize::parse(font_size);
        }
        if let Some(theme_color) = &render.theme_color {
            theme_color.trim().clone_into(&mut config.theme_color);
        }
        if let Some(server) = &self.plantuml.server {
            config.plantuml_server.clone_from(server);
        }
        if let Some(toc_title) = &render.toc_title {
            config.toc_title.clone_from(toc_title);
        }

        let toggles = [
            (render.mac_code_block, &mut config.mac_code_block),
            (render.code_line_numbers, &mut config.code_line_numbers),
            (render.paragraph_indent, &mut config.paragraph_indent),
            (render.paragraph_justify, &mut config.paragraph_justify),
            (render.link_references, &mut config.link_references),
            (render.line_breaks, &mut config.line_breaks),
        ];
        for (value, target) in toggles {
            if let Some(value) = value {
                *target = value;
            }
        }

        config
    }

    /// Custom themes in file order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a theme table is malformed.
    pub fn themes(&self) -> Result<Vec<Theme>, ConfigError> {
        themes::parse_themes(&self.themes)
    }

    /// Built-in themes plus the custom ones.
    ///
    /// Custom themes replace built-ins with the same id.
    pub fn theme_registry(&self) -> Result<ThemeRegistry, ConfigError> {
        let mut registry = ThemeRegistry::builtin();
        for theme in self.themes()? {
            registry.register(theme);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render_config(), RenderConfig::default());
        assert!(config.themes().unwrap().is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r##"
[render]
theme = "github"
font = "Georgia, serif"
font_size = "large"
theme_color = "#0f766e"
code_line_numbers = true
mac_code_block = false
toc_title = "On this page"
"##;
        let config: Config = toml::from_str(toml).unwrap();
        let render = config.render_config();

        assert_eq!(render.theme, "github");
        assert_eq!(render.font, "Georgia, serif");
        assert_eq!(render.font_size, FontSize::Large);
        assert_eq!(render.theme_color, "#0f766e");
        assert!(render.code_line_numbers);
        assert!(!render.mac_code_block);
        assert!(render.line_breaks);
        assert_eq!(render.toc_title, "On this page");
    }

    #[test]
    fn test_unknown_font_size_is_recommended() {
        let config: Config = toml::from_str("[render]\nfont_size = \"giant\"\n").unwrap();
        assert_eq!(config.render_config().font_size, FontSize::Recommended);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<Config, _> = toml::from_str("[render]\ncolour = \"red\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings_override_file() {
        let mut config: Config =
            toml::from_str("[render]\ntheme = \"github\"\nfont = \"serif\"\n").unwrap();
        let overrides = CliSettings {
            theme: Some("book".to_owned()),
            font_size: Some("small".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);
        let render = config.render_config();

        assert_eq!(render.theme, "book");
        assert_eq!(render.font, "serif"); // Unchanged
        assert_eq!(render.font_size, FontSize::Small);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config: Config = toml::from_str("[plantuml]\nserver = \"http://uml\"\n").unwrap();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.render_config().plantuml_server, "http://uml");
    }

    #[test]
    fn test_validate_theme_color() {
        for color in ["#abc", "#1E40AF"] {
            let config = Config {
                render: RenderSettings {
                    theme_color: Some(color.to_owned()),
                    ..Default::default()
                },
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{color} should be valid");
        }
        for color in ["red", "#12345", "#1e40af80", "1e40af"] {
            let config = Config {
                render: RenderSettings {
                    theme_color: Some(color.to_owned()),
                    ..Default::default()
                },
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("render.theme_color"));
        }
    }

    #[test]
    fn test_validate_plantuml_server_scheme() {
        let config = Config {
            plantuml: PlantUmlConfig {
                server: Some("ftp://uml".to_owned()),
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("plantuml.server"));
    }

    #[test]
    fn test_custom_theme_registry() {
        let toml = r##"
[themes.paper]
name = "Paper"

[themes.paper.block.h1]
color = "#000"
"##;
        let config: Config = toml::from_str(toml).unwrap();
        let registry = config.theme_registry().unwrap();
        let paper = registry.resolve("paper");

        assert_eq!(paper.name, "Paper");
        // Missing required selectors come from the default theme
        assert!(paper.rule("blockquote").is_some());
        assert_eq!(
            paper.rule("p"),
            registry.resolve("default").rule("p")
        );
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[render]\ntheme = \"wechat\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.render_config().theme, "wechat");
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_path() {
        let result = Config::load(Some(Path::new("/nonexistent/mdstyle.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdstyle.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            theme_color: Some("blue".to_owned()),
            ..Default::default()
        };

        let result = Config::load(Some(&path), Some(&overrides));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdstyle.toml");
        std::fs::write(&path, "[render\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("project");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(nested.join(CONFIG_FILENAME))
        );
    }
}
