//! Mock HubSpot API for testing.
//!
//! Provides [`MockHubSpot`], an in-memory [`HubSpotApi`] that records every
//! call for later inspection.

use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::{FileUpload, HubSpotApi};
use crate::error::HubSpotError;
use crate::refs::FolderRef;
use crate::types::{BlogPost, File, FileQuery, NewBlogPost};

/// A call made against [`MockHubSpot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `find_posts_by_name(name)`
    FindPostsByName(String),
    /// `get_post(id)`
    GetPost(String),
    /// `create_post(post)`
    CreatePost(NewBlogPost),
    /// `update_post(id, post)` with the body that was sent.
    UpdatePost {
        /// Post ID.
        id: String,
        /// Post body sent.
        post_body: Option<String>,
    },
    /// `archive_post(id)`
    ArchivePost(String),
    /// `search_files(query)`
    SearchFiles(FileQuery),
    /// `get_file(id)`
    GetFile(String),
    /// `upload_file(upload)`
    UploadFile {
        /// Local source file.
        source: PathBuf,
        /// Remote file name.
        name: String,
        /// Destination folder.
        folder: FolderRef,
    },
    /// `replace_file(id, source)`
    ReplaceFile {
        /// File ID.
        id: String,
        /// Local source file.
        source: PathBuf,
    },
    /// `archive_file(id)`
    ArchiveFile(String),
}

/// In-memory HubSpot API.
///
/// Use the builder methods to seed posts and files.
///
/// # Example
///
/// ```ignore
/// use hstw_hubspot::{BlogPost, HubSpotAdapter, MockHubSpot};
///
/// let api = MockHubSpot::new().with_post(BlogPost { id: "1".into(), name: "hello".into(), ..Default::default() });
/// let adapter = HubSpotAdapter::new(api);
/// let post = adapter.get_blogpost_by_name("hello").unwrap();
/// ```
#[derive(Debug)]
pub struct MockHubSpot {
    posts: RwLock<Vec<BlogPost>>,
    files: RwLock<Vec<File>>,
    vanished: RwLock<Vec<File>>,
    calls: RwLock<Vec<ApiCall>>,
    next_id: AtomicU64,
}

impl Default for MockHubSpot {
    fn default() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            files: RwLock::new(Vec::new()),
            vanished: RwLock::new(Vec::new()),
            calls: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1000),
        }
    }
}

impl MockHubSpot {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing blog post.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_post(self, post: BlogPost) -> Self {
        self.posts.write().unwrap().push(post);
        self
    }

    /// Add an existing file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, file: File) -> Self {
        self.files.write().unwrap().push(file);
        self
    }

    /// Add a file that searches find but that is gone when fetched.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_vanished_file(self, file: File) -> Self {
        self.vanished.write().unwrap().push(file);
        self
    }

    /// Calls made so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.read().unwrap().clone()
    }

    /// Current blog posts.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn posts(&self) -> Vec<BlogPost> {
        self.posts.read().unwrap().clone()
    }

    /// Current files.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn files(&self) -> Vec<File> {
        self.files.read().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.write().unwrap().push(call);
    }

    fn next_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

fn matches_query(file: &File, query: &FileQuery) -> bool {
    query.name.as_ref().is_none_or(|name| &file.name == name)
        && (query.parent_folder_ids.is_empty()
            || file
                .parent_folder_id
                .as_ref()
                .is_some_and(|id| query.parent_folder_ids.contains(id)))
        && query
            .path
            .as_ref()
            .is_none_or(|path| file.path.as_ref() == Some(path))
        && (query.ids.is_empty() || query.ids.contains(&file.id))
}

impl HubSpotApi for MockHubSpot {
    fn find_posts_by_name(&self, name: &str) -> Result<Vec<BlogPost>, HubSpotError> {
        self.record(ApiCall::FindPostsByName(name.to_owned()));
        Ok(self
            .posts
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.name == name)
            .cloned()
            .collect())
    }

    fn get_post(&self, id: &str) -> Result<BlogPost, HubSpotError> {
        self.record(ApiCall::GetPost(id.to_owned()));
        self.posts
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| HubSpotError::NotFound(format!("blog post id={id}")))
    }

    fn create_post(&self, post: &NewBlogPost) -> Result<BlogPost, HubSpotError> {
        self.record(ApiCall::CreatePost(post.clone()));
        let created = BlogPost {
            id: self.next_id(),
            name: post.name.clone(),
            slug: Some(post.slug.clone()),
            content_group_id: Some(post.content_group_id.clone()),
            state: Some("DRAFT".to_owned()),
            ..BlogPost::default()
        };
        self.posts.write().unwrap().push(created.clone());
        Ok(created)
    }

    fn update_post(&self, id: &str, post: &BlogPost) -> Result<BlogPost, HubSpotError> {
        self.record(ApiCall::UpdatePost {
            id: id.to_owned(),
            post_body: post.post_body.clone(),
        });
        let mut posts = self.posts.write().unwrap();
        let existing = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| HubSpotError::NotFound(format!("blog post id={id}")))?;
        *existing = BlogPost {
            id: id.to_owned(),
            ..post.clone()
        };
        Ok(existing.clone())
    }

    fn archive_post(&self, id: &str) -> Result<(), HubSpotError> {
        self.record(ApiCall::ArchivePost(id.to_owned()));
        let mut posts = self.posts.write().unwrap();
        let idx = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| HubSpotError::NotFound(format!("blog post id={id}")))?;
        posts.remove(idx);
        Ok(())
    }

    fn search_files(&self, query: &FileQuery) -> Result<Vec<File>, HubSpotError> {
        self.record(ApiCall::SearchFiles(query.clone()));
        let files = self.files.read().unwrap();
        let vanished = self.vanished.read().unwrap();
        Ok(files
            .iter()
            .chain(vanished.iter())
            .filter(|f| matches_query(f, query))
            .cloned()
            .collect())
    }

    fn get_file(&self, id: &str) -> Result<File, HubSpotError> {
        self.record(ApiCall::GetFile(id.to_owned()));
        self.files
            .read()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| HubSpotError::NotFound(format!("file id={id}")))
    }

    fn upload_file(&self, upload: &FileUpload<'_>) -> Result<File, HubSpotError> {
        self.record(ApiCall::UploadFile {
            source: upload.source.to_path_buf(),
            name: upload.name.to_owned(),
            folder: upload.folder.clone(),
        });
        let name = Path::new(upload.name);
        let (parent_folder_id, path) = match upload.folder {
            FolderRef::Id(id) => (Some(id.clone()), None),
            FolderRef::Path(path) => (
                None,
                Some(format!("{}/{}", path.trim_end_matches('/'), upload.name)),
            ),
        };
        let file = File {
            id: self.next_id(),
            name: name
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path,
            url: Some(format!("https://mock.hubspot.invalid/hubfs/{}", upload.name)),
            parent_folder_id,
            extension: name.extension().map(|e| e.to_string_lossy().into_owned()),
            ..File::default()
        };
        self.files.write().unwrap().push(file.clone());
        Ok(file)
    }

    fn replace_file(&self, id: &str, source: &Path) -> Result<File, HubSpotError> {
        self.record(ApiCall::ReplaceFile {
            id: id.to_owned(),
            source: source.to_path_buf(),
        });
        self.files
            .read()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| HubSpotError::NotFound(format!("file id={id}")))
    }

    fn archive_file(&self, id: &str) -> Result<(), HubSpotError> {
        self.record(ApiCall::ArchiveFile(id.to_owned()));
        let mut files = self.files.write().unwrap();
        let idx = files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| HubSpotError::NotFound(format!("file id={id}")))?;
        files.remove(idx);
        Ok(())
    }
}
