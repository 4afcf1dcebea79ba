//! HubSpot REST operations used by the adapter.

use std::path::Path;

use crate::error::HubSpotError;
use crate::refs::FolderRef;
use crate::types::{BlogPost, File, FileQuery, NewBlogPost};

/// A new file to store in the file manager.
#[derive(Debug, Clone, Copy)]
pub struct FileUpload<'a> {
    /// Local file to read.
    pub source: &'a Path,
    /// Remote file name.
    pub name: &'a str,
    /// Destination folder.
    pub folder: &'a FolderRef,
}

/// Blog post and file endpoints of the HubSpot API.
///
/// Implemented by [`HubSpotClient`](crate::HubSpotClient) over HTTP.
/// Missing resources are reported as [`HubSpotError::NotFound`].
pub trait HubSpotApi {
    /// `GET /cms/v3/blogs/posts?name=`
    fn find_posts_by_name(&self, name: &str) -> Result<Vec<BlogPost>, HubSpotError>;

    /// `GET /cms/v3/blogs/posts/{id}`
    fn get_post(&self, id: &str) -> Result<BlogPost, HubSpotError>;

    /// `POST /cms/v3/blogs/posts`
    fn create_post(&self, post: &NewBlogPost) -> Result<BlogPost, HubSpotError>;

    /// `PATCH /cms/v3/blogs/posts/{id}`
    fn update_post(&self, id: &str, post: &BlogPost) -> Result<BlogPost, HubSpotError>;

    /// `DELETE /cms/v3/blogs/posts/{id}`
    fn archive_post(&self, id: &str) -> Result<(), HubSpotError>;

    /// `GET /files/v3/files/search`
    fn search_files(&self, query: &FileQuery) -> Result<Vec<File>, HubSpotError>;

    /// `GET /files/v3/files/{id}`
    fn get_file(&self, id: &str) -> Result<File, HubSpotError>;

    /// `POST /files/v3/files`
    fn upload_file(&self, upload: &FileUpload<'_>) -> Result<File, HubSpotError>;

    /// `PUT /files/v3/files/{id}`
    fn replace_file(&self, id: &str, source: &Path) -> Result<File, HubSpotError>;

    /// `DELETE /files/v3/files/{id}`
    fn archive_file(&self, id: &str) -> Result<(), HubSpotError>;
}
