//! `mdstyle themes` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdstyle_config::Config;
use mdstyle_themes::{DEFAULT_THEME, ThemeRegistry};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the themes command.
#[derive(Args)]
pub(crate) struct ThemesArgs {
    /// Path to configuration file (default: auto-discover mdstyle.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ThemesArgs {
    /// Execute the themes command.
    ///
    /// Lists built-in themes and custom themes from the config.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let registry = config.theme_registry()?;

        output.heading("Themes:");
        for (id, name) in theme_rows(&registry) {
            output.row(&id, &name);
        }
        output.heading("Aliases:");
        let mut aliases: Vec<_> = registry.aliases().collect();
        aliases.sort_unstable();
        for (alias, target) in aliases {
            output.row(alias, &format!("-> {target}"));
        }
        Ok(())
    }
}

/// `(id, label)` rows in registration order, marking the default theme.
fn theme_rows(registry: &ThemeRegistry) -> Vec<(String, String)> {
    registry
        .iter()
        .map(|theme| {
            let label = if theme.id == DEFAULT_THEME {
                format!("{} (default)", theme.name)
            } else {
                theme.name.clone()
            };
            (theme.id.clone(), label)
        })
        .collect()
}
