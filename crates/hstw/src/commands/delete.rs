//! `hstw delete` subcommand group.

use std::path::Path;

use clap::builder::BoolishValueParser;
use clap::{ArgGroup, Args, Subcommand};
use hstw_config::CliSettings;
use hstw_core::FileTarget;
use hstw_hubspot::{Confirmation, HubSpotError, PostRef};

use super::connect;
use crate::error::CliError;
use crate::output::Output;

/// Delete commands.
#[derive(Subcommand)]
pub(crate) enum DeleteCommand {
    /// Delete (archive) a blog post.
    Post(DeletePostArgs),
    /// Delete (archive) files from the file manager.
    File(DeleteFileArgs),
}

impl DeleteCommand {
    /// Execute the delete subcommand.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        match self {
            Self::Post(args) => args.execute(config_path),
            Self::File(args) => args.execute(config_path),
        }
    }
}

/// Options shared by the delete commands.
#[derive(Args)]
pub(crate) struct DeleteOptions {
    /// HubSpot private app access token.
    #[arg(long, env = "HUBSPOT_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Delete without asking for confirmation.
    #[arg(long, env = "CONFIRM", value_parser = BoolishValueParser::new())]
    yes: bool,
}

impl DeleteOptions {
    fn confirmation(&self) -> Confirmation {
        if self.yes {
            Confirmation::Yes
        } else {
            Confirmation::Interactive
        }
    }

    fn settings(&self) -> CliSettings {
        CliSettings {
            access_token: self.access_token.clone(),
            ..Default::default()
        }
    }
}

/// Arguments for the delete post command.
#[derive(Args)]
#[command(group = ArgGroup::new("post").required(true))]
pub(crate) struct DeletePostArgs {
    /// Blog post identifier.
    #[arg(long, group = "post")]
    id: Option<String>,

    /// Blog post name.
    #[arg(long, group = "post")]
    name: Option<String>,

    #[command(flatten)]
    options: DeleteOptions,
}

impl DeletePostArgs {
    fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let reference = PostRef::from_options(self.id, self.name)?;
        let (_, adapter) = connect(config_path, &self.options.settings())?;

        match hstw_core::delete_blogpost(&adapter, reference, self.options.confirmation())? {
            Some(post) => output.success(&format!(
                "Deleted blog post: id={}, name={}",
                post.id, post.name
            )),
            None => output.warning("No blog post deleted"),
        }
        Ok(())
    }
}

/// Arguments for the delete file command.
#[derive(Args)]
#[command(group = ArgGroup::new("file").required(true))]
pub(crate) struct DeleteFileArgs {
    /// File identifier.
    #[arg(long, group = "file")]
    id: Option<String>,

    /// Full file path in the file manager.
    #[arg(long, group = "file")]
    path: Option<String>,

    #[command(flatten)]
    options: DeleteOptions,
}

impl DeleteFileArgs {
    fn target(&self) -> Option<FileTarget> {
        match (&self.id, &self.path) {
            (Some(id), _) => Some(FileTarget::Id(id.clone())),
            (None, Some(path)) => Some(FileTarget::Path(path.clone())),
            (None, None) => None,
        }
    }

    fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let target = self.target().ok_or_else(|| {
            CliError::HubSpot(HubSpotError::Config(
                "One of 'id' or 'path' must be specified".to_owned(),
            ))
        })?;
        let (_, adapter) = connect(config_path, &self.options.settings())?;

        let deleted = hstw_core::delete_file(&adapter, &target, self.options.confirmation())?;
        if deleted.is_empty() {
            output.warning("No files deleted");
        }
        for file in &deleted {
            output.success(&format!(
                "Deleted file: id={}, name={}, path={}",
                file.id,
                file.name,
                file.path.as_deref().unwrap_or_default()
            ));
        }
        Ok(())
    }
}
