//! File manager operations for HubSpot API.

use std::path::Path;

use tracing::{debug, info};

use super::multipart::{Multipart, guess_content_type};
use super::{HubSpotClient, check_status};
use crate::api::FileUpload;
use crate::error::HubSpotError;
use crate::refs::FolderRef;
use crate::types::{CollectionResponse, File, FileOptions, FileQuery};

const FILES_PATH: &str = "/files/v3/files";

impl HubSpotClient {
    /// Search files.
    pub(crate) fn search_files(&self, query: &FileQuery) -> Result<Vec<File>, HubSpotError> {
        debug!("Searching files: {:?}", query);

        let mut request = self
            .agent
            .get(&self.url(&format!("{FILES_PATH}/search")))
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json");
        for (key, value) in query.params() {
            request = request.query(key, value);
        }

        let mut body = check_status(request.call()?, "files")?;
        let collection: CollectionResponse<File> = body.read_json()?;
        Ok(collection.results)
    }

    /// Get file by ID.
    pub(crate) fn get_file(&self, id: &str) -> Result<File, HubSpotError> {
        info!("Getting file {}", id);

        let response = self
            .agent
            .get(&self.url(&format!("{FILES_PATH}/{id}")))
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call()?;

        let mut body = check_status(response, &format!("file id={id}"))?;
        Ok(body.read_json()?)
    }

    /// Upload a new file.
    pub(crate) fn upload_file(&self, upload: &FileUpload<'_>) -> Result<File, HubSpotError> {
        info!(
            "Uploading file '{}' from {} to {}",
            upload.name,
            upload.source.display(),
            upload.folder
        );

        let data = std::fs::read(upload.source)?;
        let options = serde_json::to_string(&FileOptions::default())?;

        let mut form = Multipart::new();
        form.file("file", upload.name, guess_content_type(upload.name), &data)
            .text("fileName", upload.name);
        match upload.folder {
            FolderRef::Id(id) => form.text("folderId", id),
            FolderRef::Path(path) => form.text("folderPath", path),
        };
        form.text("options", &options);

        let content_type = form.content_type();
        let response = self
            .agent
            .post(&self.url(FILES_PATH))
            .header("Authorization", &self.auth_header())
            .header("Content-Type", &content_type)
            .header("Accept", "application/json")
            .send(&form.finish()[..])?;

        let mut body = check_status(response, "files")?;
        Ok(body.read_json()?)
    }

    /// Replace the content of an existing file.
    pub(crate) fn replace_file(&self, id: &str, source: &Path) -> Result<File, HubSpotError> {
        info!("Replacing file {} with {}", id, source.display());

        let data = std::fs::read(source)?;
        let options = serde_json::to_string(&FileOptions::default())?;
        let filename = source
            .file_name()
            .map_or_else(|| id.to_owned(), |n| n.to_string_lossy().into_owned());

        let mut form = Multipart::new();
        form.file("file", &filename, guess_content_type(&filename), &data)
            .text("options", &options);

        let content_type = form.content_type();
        let response = self
            .agent
            .put(&self.url(&format!("{FILES_PATH}/{id}")))
            .header("Authorization", &self.auth_header())
            .header("Content-Type", &content_type)
            .header("Accept", "application/json")
            .send(&form.finish()[..])?;

        let mut body = check_status(response, &format!("file id={id}"))?;
        Ok(body.read_json()?)
    }

    /// Archive a file.
    pub(crate) fn archive_file(&self, id: &str) -> Result<(), HubSpotError> {
        info!("Archiving file {}", id);

        let response = self
            .agent
            .delete(&self.url(&format!("{FILES_PATH}/{id}")))
            .header("Authorization", &self.auth_header())
            .call()?;

        check_status(response, &format!("file id={id}"))?;
        Ok(())
    }
}
