//! Colored terminal output.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Status lines go to stderr so that listings on stdout stay pipeable.
pub(crate) struct Output {
    status: Term,
    listing: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            listing: Term::stdout(),
        }
    }

    fn status_line(&self, style: &Style, msg: &str) {
        let _ = self.status.write_line(&style.apply_to(msg).to_string());
    }

    /// Plain status message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.status.write_line(msg);
    }

    /// Green status message.
    pub(crate) fn success(&self, msg: &str) {
        self.status_line(&Style::new().green(), msg);
    }

    /// Yellow status message.
    pub(crate) fn warning(&self, msg: &str) {
        self.status_line(&Style::new().yellow(), msg);
    }

    /// Red status message.
    pub(crate) fn error(&self, msg: &str) {
        self.status_line(&Style::new().red(), msg);
    }

    /// Section heading in a listing (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        let styled = Style::new().cyan().bold().apply_to(msg).to_string();
        let _ = self.listing.write_line(&styled);
    }

    /// Watch-mode banner (cyan bold, stderr).
    pub(crate) fn banner(&self, msg: &str) {
        self.status_line(&Style::new().cyan().bold(), msg);
    }

    /// Listing row: padded key, then a dimmed description.
    pub(crate) fn row(&self, key: &str, description: &str) {
        let description = Style::new().dim().apply_to(description);
        let _ = self.listing.write_line(&format!("  {key:<16} {description}"));
    }
}
