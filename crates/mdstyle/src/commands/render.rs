//! `mdstyle render` command implementation.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use mdstyle_config::{CliSettings, Config};
use mdstyle_renderer::{Engine, ExtensionRegistry, RenderConfig, escape_html};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::error::CliError;
use crate::output::Output;

/// Quiet period that ends a burst of file events.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    input: PathBuf,

    /// Output HTML file (default: document title + `.html` in the current directory).
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdstyle.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme id (overrides config).
    #[arg(short, long, env = "MDSTYLE_THEME")]
    theme: Option<String>,

    /// CSS font family (overrides config).
    #[arg(long)]
    font: Option<String>,

    /// Font size tier: smaller, small, recommended, large or larger (overrides config).
    #[arg(long)]
    font_size: Option<String>,

    /// Accent color as #rgb or #rrggbb (overrides config).
    #[arg(long)]
    theme_color: Option<String>,

    /// Write only the styled fragment instead of a full HTML document.
    #[arg(long)]
    fragment: bool,

    /// Re-render whenever the input file changes.
    #[arg(short, long)]
    watch: bool,

    /// Enable verbose output (show render timing and recovered faults).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read, or
    /// the output cannot be written. In watch mode, errors after the first
    /// render are reported and watching continues.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if !self.input.is_file() {
            return Err(CliError::Validation(format!(
                "Input file not found: {}",
                self.input.display()
            )));
        }

        let cli_settings = CliSettings {
            theme: self.theme.clone(),
            font: self.font.clone(),
            font_size: self.font_size.clone(),
            theme_color: self.theme_color.clone(),
            plantuml_server: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Using config: {}", path.display()));
        }

        let engine = Engine::new(ExtensionRegistry::with_defaults(), config.theme_registry()?);
        let render_config = config.render_config();

        let target = self.render_file(&engine, &render_config, None, &output)?;
        if self.watch {
            self.watch_input(&engine, &render_config, &target, &output)?;
        }
        Ok(())
    }

    /// Render the input once and write it to `target` (or the default path).
    ///
    /// Returns the path written.
    fn render_file(
        &self,
        engine: &Engine,
        config: &RenderConfig,
        target: Option<&Path>,
        output: &Output,
    ) -> Result<PathBuf, CliError> {
        let source = fs::read_to_string(&self.input)?;
        let rendered = engine.render_document(&source, config)?;
        for warning in &rendered.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let target = match target {
            Some(target) => target.to_path_buf(),
            None => self
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(rendered.title.as_deref(), &self.input)),
        };

        let html = if self.fragment {
            rendered.html
        } else {
            let title = rendered
                .title
                .as_deref()
                .or_else(|| self.input.file_stem().and_then(OsStr::to_str))
                .unwrap_or("Document");
            standalone_document(&rendered.html, title)
        };
        fs::write(&target, html)?;

        output.success(&format!(
            "Wrote {} ({} words, {} min read)",
            target.display(),
            rendered.stats.words,
            rendered.stats.minutes
        ));
        Ok(target)
    }

    /// Re-render on every change to the input until interrupted.
    fn watch_input(
        &self,
        engine: &Engine,
        config: &RenderConfig,
        target: &Path,
        output: &Output,
    ) -> Result<(), CliError> {
        let (tx, rx) = mpsc::channel::<Event>();
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        })?;

        // Editors often replace the file on save, so watch its directory
        let dir = self
            .input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        output.banner(&format!(
            "Watching {} for changes (Ctrl+C to stop)",
            self.input.display()
        ));

        let file_name = self.input.file_name();
        while let Ok(event) = rx.recv() {
            if !is_change_to(&event, file_name) {
                continue;
            }
            while rx.recv_timeout(DEBOUNCE).is_ok() {}

            tracing::info!(path = %self.input.display(), "Input changed, re-rendering");
            if let Err(err) = self.render_file(engine, config, Some(target), output) {
                output.error(&format!("Error: {err}"));
            }
        }
        Ok(())
    }
}

/// Whether `event` creates or modifies a file named `file_name`.
fn is_change_to(event: &Event, file_name: Option<&OsStr>) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event.paths.iter().any(|p| p.file_name() == file_name)
}

/// `<title>.html` in the current directory, falling back to the input stem.
fn default_output_path(title: Option<&str>, input: &Path) -> PathBuf {
    let name = title
        .map(sanitize_filename)
        .filter(|name| !name.is_empty())
        .or_else(|| {
            input
                .file_stem()
                .and_then(OsStr::to_str)
                .map(sanitize_filename)
                .filter(|name| !name.is_empty())
        })
        .unwrap_or_else(|| "document".to_owned());
    PathBuf::from(format!("{name}.html"))
}

/// Replace characters that are invalid in file names on common platforms.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect::<String>()
        .trim()
        .trim_matches('.')
        .to_owned()
}

/// Wrap a styled fragment in a complete HTML document.
fn standalone_document(body: &str, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        escape_html(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(input: PathBuf, output: Option<PathBuf>) -> RenderArgs {
        RenderArgs {
            input,
            output,
            config: None,
            theme: None,
            font: None,
            font_size: None,
            theme_color: None,
            fragment: false,
            watch: false,
            verbose: false,
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Notes: a/b?"), "Notes_ a_b_");
        assert_eq!(sanitize_filename("  .hidden. "), "hidden");
        assert_eq!(sanitize_filename("读书笔记"), "读书笔记");
    }

    #[test]
    fn test_default_output_path() {
        let input = Path::new("docs/post.md");
        assert_eq!(
            default_output_path(Some("My Post"), input),
            PathBuf::from("My Post.html")
        );
        assert_eq!(default_output_path(None, input), PathBuf::from("post.html"));
        assert_eq!(
            default_output_path(Some("///"), input),
            PathBuf::from("___.html")
        );
        assert_eq!(
            default_output_path(Some("..."), Path::new("...")),
            PathBuf::from("document.html")
        );
    }

    #[test]
    fn test_standalone_document() {
        let html = standalone_document("<p>x</p>", "A & B");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<body>\n<p>x</p>\n</body>"));
    }

    #[test]
    fn test_is_change_to() {
        let event = Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(PathBuf::from("/docs/post.md"));
        assert!(is_change_to(&event, Some(OsStr::new("post.md"))));
        assert!(!is_change_to(&event, Some(OsStr::new("other.md"))));

        let removed = Event::new(EventKind::Remove(notify::event::RemoveKind::Any))
            .add_path(PathBuf::from("/docs/post.md"));
        assert!(!is_change_to(&removed, Some(OsStr::new("post.md"))));
    }

    #[test]
    fn test_render_file_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("post.md");
        let target = dir.path().join("out.html");
        fs::write(&input, "# Hello\n\nSome text").unwrap();

        let args = args(input, Some(target.clone()));
        let written = args
            .render_file(&Engine::default(), &RenderConfig::default(), None, &Output::new())
            .unwrap();

        assert_eq!(written, target);
        let html = fs::read_to_string(&target).unwrap();
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains(r#"<h1 id="hello">Hello</h1>"#));
    }

    #[test]
    fn test_render_file_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("post.md");
        let target = dir.path().join("out.html");
        fs::write(&input, "text").unwrap();

        let mut args = args(input, None);
        args.fragment = true;
        args.render_file(
            &Engine::default(),
            &RenderConfig::default(),
            Some(&target),
            &Output::new(),
        )
        .unwrap();

        let html = fs::read_to_string(&target).unwrap();
        assert!(html.starts_with("<style>"));
        assert!(!html.contains("<!DOCTYPE html>"));
    }
}
