//! hstw CLI - Markdown blog posts for HubSpot.
//!
//! Provides commands for:
//! - `convert`: Convert Markdown to HubSpot HTML
//! - `linkcheck`: Check links and images of documents
//! - `upload`: Publish a document as blog post, or a file to the file manager
//! - `delete post` / `delete file`: Archive blog posts and files

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, DeleteCommand, LinkcheckArgs, UploadArgs};
use error::CliError;
use output::Output;

/// hstw - Write blog posts in Markdown, publish them to HubSpot.
#[derive(Parser)]
#[command(name = "hstw", version, about)]
struct Cli {
    /// Turn on logging.
    #[arg(long, global = true)]
    verbose: bool,

    /// Turn on logging with debug level.
    #[arg(long, global = true)]
    debug: bool,

    /// Path to configuration file (default: auto-discover hstw.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown to HTML suitable for HubSpot blog posts.
    Convert(ConvertArgs),
    /// Check links and images of a Markdown or HTML document.
    Linkcheck(LinkcheckArgs),
    /// Upload a document as blog post, or any other file to the file manager.
    Upload(UploadArgs),
    /// Delete (archive) blog posts and files.
    #[command(subcommand)]
    Delete(DeleteCommand),
}

impl Cli {
    fn log_filter(&self) -> EnvFilter {
        if self.debug {
            EnvFilter::new("debug")
        } else if self.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --debug enables DEBUG, --verbose INFO, otherwise RUST_LOG or WARN
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Linkcheck(args) => args.execute(config),
        Commands::Upload(args) => args.execute(config),
        Commands::Delete(cmd) => cmd.execute(config),
    };

    if let Err(err) = result {
        if !matches!(err, CliError::BrokenLinks(_)) {
            output.error(&format!("Error: {err}"));
        }
        std::process::exit(err.exit_code());
    }
}
