//! `hstw linkcheck` command implementation.

use std::path::Path;
use std::time::Duration;

use clap::Args;
use hstw_config::{CliSettings, Config};
use hstw_core::{LinkChecker, LinkReport, LinkStatus, LinkcheckOptions, Source, SourceReader};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the linkcheck command.
#[derive(Args)]
pub(crate) struct LinkcheckArgs {
    /// Markdown or HTML sources: local paths, http(s) URLs or github+https:// URLs.
    #[arg(required = true)]
    sources: Vec<String>,

    /// Skip remote links.
    #[arg(long)]
    no_remote: bool,
}

impl LinkcheckArgs {
    /// Execute the linkcheck command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::BrokenLinks`] when any target is broken.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let settings = CliSettings {
            linkcheck_remote: self.no_remote.then_some(false),
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&settings))?;
        let checker = LinkChecker::new(LinkcheckOptions {
            remote: config.linkcheck.remote,
            timeout: Duration::from_secs(config.linkcheck.timeout),
        });
        let reader = SourceReader::new();

        let mut broken = 0;
        for source in &self.sources {
            let source = Source::parse(source)?;
            let reports = checker.check_source(&source, &reader)?;
            for report in &reports {
                print_report(&output, report);
            }
            broken += count_broken(&reports);
        }
        output.info(&summary(self.sources.len()));

        if broken > 0 {
            output.error(&format!("\nLink check failed: {broken} broken target(s)"));
            return Err(CliError::BrokenLinks(broken));
        }
        output.success("\nLink check passed");
        Ok(())
    }
}

fn count_broken(reports: &[LinkReport]) -> usize {
    reports.iter().map(|r| r.broken().count()).sum()
}

fn summary(files: usize) -> String {
    format!("\nTotal files checked: {files}")
}

fn print_report(output: &Output, report: &LinkReport) {
    output.info(&format!("\n{}", report.document));
    for result in &report.results {
        match &result.status {
            LinkStatus::Ok => output.success(&format!("[✓] {}", result.target)),
            LinkStatus::Skipped => output.muted(&format!("[-] {}", result.target)),
            LinkStatus::Broken(reason) => {
                output.error(&format!("[✖] {} ({reason})", result.target));
            }
        }
    }
    output.info(&format!("Total links checked: {}", report.results.len()));
}
