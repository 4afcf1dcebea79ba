//! `hstw upload` command implementation.

use std::path::Path;

use clap::Args;
use hstw_config::CliSettings;
use hstw_core::{Source, SourceReader, UploadRequest, Uploaded};
use hstw_hubspot::FolderRef;

use super::connect;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the upload command.
#[derive(Args)]
pub(crate) struct UploadArgs {
    /// Document or file to upload: local path, http(s) URL or github+https:// URL.
    source: String,

    /// Name of the blog post or file (default: derived from the source).
    #[arg(long)]
    name: Option<String>,

    /// Blog (content group) for new posts.
    #[arg(long)]
    content_group_id: Option<String>,

    /// Folder for files and images, by identifier.
    #[arg(long, conflicts_with = "folder_path")]
    folder_id: Option<String>,

    /// Folder for files and images, by path.
    #[arg(long)]
    folder_path: Option<String>,

    /// HubSpot private app access token.
    #[arg(long, env = "HUBSPOT_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
}

impl UploadArgs {
    /// Execute the upload command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or the upload fails.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let settings = CliSettings {
            access_token: self.access_token,
            content_group_id: self.content_group_id,
            folder_id: self.folder_id,
            folder_path: self.folder_path,
            ..Default::default()
        };
        let (config, adapter) = connect(config_path, &settings)?;
        let hubspot = &config.hubspot;

        let request = UploadRequest {
            source: Source::parse(&self.source)?,
            name: self.name,
            content_group_id: hubspot.content_group_id.clone(),
            folder: FolderRef::optional(hubspot.folder_id.clone(), hubspot.folder_path.clone())?,
        };
        output.info(&format!("Uploading {}...", request.source));

        match hstw_core::upload(&adapter, &SourceReader::new(), &request)? {
            Uploaded::Post(post) => {
                output.success("\nBlog post saved");
                output.info(&format!("ID: {}", post.id));
                output.info(&format!("Name: {}", post.name));
                if let Some(url) = &post.url {
                    output.info(&format!("URL: {url}"));
                }
            }
            Uploaded::File(file) => {
                output.success("\nFile saved");
                output.info(&format!("ID: {}", file.id));
                output.info(&format!("Name: {}", file.name));
                if let Some(url) = &file.url {
                    output.info(&format!("URL: {url}"));
                }
            }
        }
        Ok(())
    }
}
