//! Confirmation of destructive operations.

use console::Term;
use tracing::warn;

/// How to confirm an archival.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Confirmation {
    /// Ask on the terminal. Declines when stderr is not a terminal.
    #[default]
    Interactive,
    /// Confirmed in advance.
    Yes,
    /// Always decline.
    No,
}

impl Confirmation {
    /// Resolve the confirmation for `prompt`.
    #[must_use]
    pub fn confirm(self, prompt: &str) -> bool {
        match self {
            Self::Yes => true,
            Self::No => false,
            Self::Interactive => ask(prompt),
        }
    }
}

fn ask(prompt: &str) -> bool {
    let term = Term::stderr();
    if !term.is_term() {
        warn!("Not a terminal, declining: {prompt}");
        return false;
    }
    if term.write_str(&format!("{prompt} [y/N]: ")).is_err() {
        return false;
    }
    term.read_line().is_ok_and(|answer| {
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    })
}
