//! `hstw convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use hstw_core::{Source, SourceReader};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown source: local path, http(s) URL or github+https:// URL.
    source: String,

    /// Output HTML file (default: stdout).
    target: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the target written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let source = Source::parse(&self.source)?;
        info!("Converting from Markdown: {source}");
        let html = hstw_core::convert(&source, &SourceReader::new())?;

        match &self.target {
            Some(target) => {
                info!("Writing output to HTML: {}", target.display());
                std::fs::write(target, format!("{html}\n"))?;
            }
            None => {
                info!("Writing output to HTML: STDOUT");
                output.document(&html)?;
            }
        }
        Ok(())
    }
}
