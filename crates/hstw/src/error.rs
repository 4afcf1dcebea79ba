//! CLI error types.

use hstw_config::ConfigError;
use hstw_core::{PublishError, SourceError};
use hstw_hubspot::HubSpotError;

/// Exit code for a failed link check.
const EXIT_BROKEN_LINKS: i32 = 22;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    HubSpot(#[from] HubSpotError),

    #[error("{0}")]
    Publish(#[from] PublishError),

    #[error("{0} broken link(s) found")]
    BrokenLinks(usize),
}

impl CliError {
    /// Process exit code for this error.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::BrokenLinks(_) => EXIT_BROKEN_LINKS,
            _ => 1,
        }
    }
}
