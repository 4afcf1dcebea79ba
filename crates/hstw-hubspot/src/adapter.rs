//! Lookup-or-create and deletion logic on top of [`HubSpotApi`].

use std::path::Path;

use tracing::{info, warn};

use crate::api::{FileUpload, HubSpotApi};
use crate::confirm::Confirmation;
use crate::error::HubSpotError;
use crate::refs::FolderRef;
use crate::types::{BlogPost, File, FileQuery, NewBlogPost};

/// Prompt shown before archiving anything.
const CONFIRM_PROMPT: &str = "Please confirm deletion (archival)";

/// Blog post and file operations over a HubSpot API implementation.
pub struct HubSpotAdapter<A> {
    api: A,
}

impl<A: HubSpotApi> HubSpotAdapter<A> {
    /// Wrap an API implementation.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The wrapped API.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Find the first blog post named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::NotFound`] if there is none.
    pub fn get_blogpost_by_name(&self, name: &str) -> Result<BlogPost, HubSpotError> {
        self.api
            .find_posts_by_name(name)?
            .into_iter()
            .next()
            .ok_or_else(|| HubSpotError::NotFound(format!("Blog post not found: {name}")))
    }

    /// Find the blog post named `name`, creating it when missing.
    ///
    /// New posts use `name` as slug and need a content group.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::NotFound`] if the post is missing and
    /// `autocreate` is off, or [`HubSpotError::Config`] if it must be created
    /// without a content group.
    pub fn get_or_create_blogpost(
        &self,
        name: &str,
        content_group_id: Option<&str>,
        autocreate: bool,
    ) -> Result<BlogPost, HubSpotError> {
        if name.is_empty() {
            return Err(HubSpotError::Config("Blog post needs a 'name'".to_owned()));
        }
        match self.get_blogpost_by_name(name) {
            Err(HubSpotError::NotFound(_)) => {
                let msg = format!("Blog post does not exist: {name}");
                warn!("{msg}");
                if !autocreate {
                    return Err(HubSpotError::NotFound(msg));
                }
                let Some(content_group_id) = content_group_id.filter(|id| !id.is_empty()) else {
                    return Err(HubSpotError::Config(
                        "Blog (content group) identifier is required for creating a blog post"
                            .to_owned(),
                    ));
                };
                info!("Creating blog post: name={name}, content_group_id={content_group_id}");
                self.api
                    .create_post(&NewBlogPost::new(name, content_group_id))
            }
            result => result,
        }
    }

    /// Find the file named `name` in `folder`.
    ///
    /// By folder id the search uses the file stem, as HubSpot stores names
    /// without extension; by folder path it uses the full path.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::NotFound`] if there is none.
    pub fn get_file_by_name(&self, name: &str, folder: &FolderRef) -> Result<File, HubSpotError> {
        if name.is_empty() {
            return Err(HubSpotError::Config("File name missing".to_owned()));
        }
        let query = match folder {
            FolderRef::Id(folder_id) => {
                let stem = Path::new(name)
                    .file_stem()
                    .map_or_else(|| name.to_owned(), |s| s.to_string_lossy().into_owned());
                info!("Searching for '{stem}' in folder id '{folder_id}'");
                FileQuery::name_in_folder(&stem, folder_id)
            }
            FolderRef::Path(folder_path) => {
                let path = format!("{}/{name}", folder_path.trim_end_matches('/'));
                info!("Searching for '{name}' in folder path '{folder_path}'");
                FileQuery::path(&path)
            }
        };

        let file = self
            .api
            .search_files(&query)?
            .into_iter()
            .next()
            .ok_or_else(|| HubSpotError::NotFound(format!("File not found in folder: {folder}")))?;
        info!(
            "Found file: id={}, path={}, url={}",
            file.id,
            file.path.as_deref().unwrap_or_default(),
            file.url.as_deref().unwrap_or_default()
        );
        Ok(file)
    }

    /// Find the file named `name` in `folder`, uploading `source` when missing.
    ///
    /// # Errors
    ///
    /// Returns API and I/O errors from the lookup or upload.
    pub fn get_or_create_file(
        &self,
        source: &Path,
        name: &str,
        folder: &FolderRef,
    ) -> Result<File, HubSpotError> {
        match self.get_file_by_name(name, folder) {
            Err(HubSpotError::NotFound(_)) => {
                warn!("File does not exist: {name}");
                info!("Creating file: name={name}, {folder}");
                self.api.upload_file(&FileUpload {
                    source,
                    name,
                    folder,
                })
            }
            result => result,
        }
    }

    /// Replace the content of file `id` with `source`.
    ///
    /// # Errors
    ///
    /// Returns API and I/O errors.
    pub fn save_file(&self, id: &str, source: &Path) -> Result<File, HubSpotError> {
        self.api.replace_file(id, source)
    }

    /// Archive the file with ID `id`, if it exists.
    ///
    /// Returns the archived file, or `None` when it is missing or the
    /// deletion was declined.
    ///
    /// # Errors
    ///
    /// Returns API errors.
    pub fn delete_file_by_id(
        &self,
        id: &str,
        confirmation: Confirmation,
    ) -> Result<Option<File>, HubSpotError> {
        let Some(file) = self.api.search_files(&FileQuery::id(id))?.into_iter().next() else {
            info!("File not found: id={id}");
            return Ok(None);
        };
        self.do_delete_file_by_id(&file.id, confirmation)
    }

    /// Archive every file at `path`.
    ///
    /// Files that disappear between search and archival are skipped.
    ///
    /// # Errors
    ///
    /// Returns API errors other than a missing file.
    pub fn delete_files_by_path(
        &self,
        path: &str,
        confirmation: Confirmation,
    ) -> Result<Vec<File>, HubSpotError> {
        let files = self.api.search_files(&FileQuery::path(path))?;
        if files.is_empty() {
            info!("Files not found: path={path}");
            return Ok(Vec::new());
        }

        let mut archived = Vec::new();
        for file in files {
            match self.do_delete_file_by_id(&file.id, confirmation) {
                Ok(Some(file)) => archived.push(file),
                Ok(None) => {}
                Err(HubSpotError::NotFound(_)) => {
                    warn!("File vanished before deletion: id={}", file.id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(archived)
    }

    /// Archive file `id` after confirmation.
    ///
    /// # Errors
    ///
    /// Returns API errors, including [`HubSpotError::NotFound`].
    pub fn do_delete_file_by_id(
        &self,
        id: &str,
        confirmation: Confirmation,
    ) -> Result<Option<File>, HubSpotError> {
        let file = self.api.get_file(id)?;
        info!(
            "About to delete file: id='{}', name='{}', path='{}'",
            file.id,
            file.name,
            file.path.as_deref().unwrap_or_default()
        );
        if !confirmation.confirm(CONFIRM_PROMPT) {
            info!("Deletion declined: id='{}'", file.id);
            return Ok(None);
        }
        self.api.archive_file(&file.id)?;
        Ok(Some(file))
    }

    /// Archive blog post `id` after confirmation.
    pub(crate) fn archive_post_confirmed(
        &self,
        id: &str,
        confirmation: Confirmation,
    ) -> Result<bool, HubSpotError> {
        if !confirmation.confirm(CONFIRM_PROMPT) {
            info!("Deletion declined: id='{id}'");
            return Ok(false);
        }
        self.api.archive_post(id)?;
        Ok(true)
    }

    /// Archive file `id` after confirmation, without looking it up first.
    pub(crate) fn archive_file_confirmed(
        &self,
        id: &str,
        confirmation: Confirmation,
    ) -> Result<bool, HubSpotError> {
        if !confirmation.confirm(CONFIRM_PROMPT) {
            info!("Deletion declined: id='{id}'");
            return Ok(false);
        }
        self.api.archive_file(id)?;
        Ok(true)
    }
}
