//! Blog post and file handles.
//!
//! A handle starts unresolved, holding only a reference. [`load`] resolves it
//! against the API, creating the resource by name when allowed. Saving and
//! deleting need a resolved handle.
//!
//! [`load`]: BlogPostHandle::load

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapter::HubSpotAdapter;
use crate::api::HubSpotApi;
use crate::confirm::Confirmation;
use crate::error::HubSpotError;
use crate::refs::{FileRef, FolderRef, PostRef};
use crate::types::{BlogPost, File};

/// A HubSpot blog post, addressed by ID or name.
pub struct BlogPostHandle<'a, A> {
    adapter: &'a HubSpotAdapter<A>,
    reference: PostRef,
    content_group_id: Option<String>,
    autocreate: bool,
    post: Option<BlogPost>,
}

impl<'a, A: HubSpotApi> BlogPostHandle<'a, A> {
    /// Unresolved handle. Auto-creation is on.
    #[must_use]
    pub fn new(adapter: &'a HubSpotAdapter<A>, reference: PostRef) -> Self {
        Self {
            adapter,
            reference,
            content_group_id: None,
            autocreate: true,
            post: None,
        }
    }

    /// Content group for posts created by name.
    #[must_use]
    pub fn with_content_group_id(mut self, content_group_id: Option<String>) -> Self {
        self.content_group_id = content_group_id;
        self
    }

    /// Whether a post missing by name is created on load.
    #[must_use]
    pub fn with_autocreate(mut self, autocreate: bool) -> Self {
        self.autocreate = autocreate;
        self
    }

    /// Fetch the post, by ID or by name.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::NotFound`] when the post is missing and cannot
    /// be created, or other API errors.
    pub fn load(&mut self) -> Result<&mut BlogPost, HubSpotError> {
        info!("Loading blog post: {self}");
        let post = match &self.reference {
            PostRef::Id(id) => self.adapter.api().get_post(id)?,
            PostRef::Name(name) => self.adapter.get_or_create_blogpost(
                name,
                self.content_group_id.as_deref(),
                self.autocreate,
            )?,
        };
        Ok(self.post.insert(post))
    }

    /// The loaded post.
    #[must_use]
    pub fn post(&self) -> Option<&BlogPost> {
        self.post.as_ref()
    }

    /// The loaded post, for editing before [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Unresolved`] before [`load`](Self::load).
    pub fn post_mut(&mut self) -> Result<&mut BlogPost, HubSpotError> {
        let unresolved = self.unresolved("edit");
        self.post.as_mut().ok_or(unresolved)
    }

    /// Write the loaded post back.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Unresolved`] before [`load`](Self::load), or
    /// API errors.
    pub fn save(&self) -> Result<BlogPost, HubSpotError> {
        let post = self.post.as_ref().ok_or_else(|| self.unresolved("save"))?;
        info!("Saving blog post: {self}");
        self.adapter.api().update_post(&post.id, post)
    }

    /// Archive the loaded post after confirmation.
    ///
    /// Returns the archived post, or `None` when declined.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Unresolved`] before [`load`](Self::load), or
    /// API errors.
    pub fn delete(&self, confirmation: Confirmation) -> Result<Option<BlogPost>, HubSpotError> {
        let post = self.post.as_ref().ok_or_else(|| self.unresolved("delete"))?;
        info!("Deleting blog post: {self}");
        if self.adapter.archive_post_confirmed(&post.id, confirmation)? {
            Ok(Some(post.clone()))
        } else {
            Ok(None)
        }
    }

    fn unresolved(&self, action: &str) -> HubSpotError {
        HubSpotError::Unresolved(format!("Unable to {action} blog post before loading it: {self}"))
    }
}

impl<A> fmt::Display for BlogPostHandle<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.post {
            Some(post) => write!(f, "BlogPost id={}, name={}", post.id, post.name),
            None => write!(f, "BlogPost {}", self.reference),
        }
    }
}

/// A file in the HubSpot file manager, addressed by ID or name within a folder.
pub struct FileHandle<'a, A> {
    adapter: &'a HubSpotAdapter<A>,
    reference: FileRef,
    folder: FolderRef,
    source: PathBuf,
    file: Option<File>,
}

impl<'a, A: HubSpotApi> FileHandle<'a, A> {
    /// Unresolved handle for local file `source`.
    #[must_use]
    pub fn new(
        adapter: &'a HubSpotAdapter<A>,
        source: &Path,
        reference: FileRef,
        folder: FolderRef,
    ) -> Self {
        Self {
            adapter,
            reference,
            folder,
            source: source.to_path_buf(),
            file: None,
        }
    }

    /// Fetch the file by ID, or find it by name and upload it when missing.
    ///
    /// # Errors
    ///
    /// Returns API and I/O errors.
    pub fn load(&mut self) -> Result<&File, HubSpotError> {
        info!("Loading file: {self}");
        let file = match &self.reference {
            FileRef::Id(id) => self.adapter.api().get_file(id)?,
            FileRef::Name(name) => self
                .adapter
                .get_or_create_file(&self.source, name, &self.folder)?,
        };
        Ok(self.file.insert(file))
    }

    /// The loaded file.
    #[must_use]
    pub fn file(&self) -> Option<&File> {
        self.file.as_ref()
    }

    /// Replace the remote content with the local source.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Unresolved`] before [`load`](Self::load), or
    /// API and I/O errors.
    pub fn save(&self) -> Result<File, HubSpotError> {
        let file = self.file.as_ref().ok_or_else(|| self.unresolved("save"))?;
        info!("Saving file: {self}");
        self.adapter.save_file(&file.id, &self.source)
    }

    /// Archive the loaded file after confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Unresolved`] before [`load`](Self::load), or
    /// API errors.
    pub fn delete(&self, confirmation: Confirmation) -> Result<Option<File>, HubSpotError> {
        let file = self.file.as_ref().ok_or_else(|| self.unresolved("delete"))?;
        info!("Deleting file: {self}");
        if self.adapter.archive_file_confirmed(&file.id, confirmation)? {
            Ok(Some(file.clone()))
        } else {
            Ok(None)
        }
    }

    fn unresolved(&self, action: &str) -> HubSpotError {
        HubSpotError::Unresolved(format!("Unable to {action} file before loading it: {self}"))
    }
}

impl<A> fmt::Display for FileHandle<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "File id={}, name={}, {}", file.id, file.name, self.folder),
            None => write!(f, "File {}, {}", self.reference, self.folder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ApiCall, MockHubSpot};
    use crate::types::NewBlogPost;
    use pretty_assertions::assert_eq;

    fn existing_post() -> BlogPost {
        BlogPost {
            id: "12345".to_owned(),
            name: "hello".to_owned(),
            post_body: Some("<p>old</p>".to_owned()),
            ..BlogPost::default()
        }
    }

    #[test]
    fn test_load_post_by_id() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new().with_post(existing_post()));
        let mut handle = BlogPostHandle::new(&adapter, PostRef::Id("12345".to_owned()));
        assert_eq!(handle.load().unwrap().name, "hello");
        assert_eq!(
            adapter.api().calls(),
            vec![ApiCall::GetPost("12345".to_owned())]
        );
    }

    #[test]
    fn test_load_missing_post_by_id() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let mut handle = BlogPostHandle::new(&adapter, PostRef::Id("1".to_owned()));
        assert!(handle.load().unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_and_save_post() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let mut handle = BlogPostHandle::new(&adapter, PostRef::Name("hello".to_owned()))
            .with_content_group_id(Some("678".to_owned()));
        handle.load().unwrap().post_body = Some("<p>new</p>".to_owned());
        let saved = handle.save().unwrap();

        assert_eq!(saved.post_body.as_deref(), Some("<p>new</p>"));
        assert_eq!(
            adapter.api().calls(),
            vec![
                ApiCall::FindPostsByName("hello".to_owned()),
                ApiCall::CreatePost(NewBlogPost::new("hello", "678")),
                ApiCall::UpdatePost {
                    id: saved.id.clone(),
                    post_body: Some("<p>new</p>".to_owned()),
                },
            ]
        );
    }

    #[test]
    fn test_save_unresolved() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let handle = BlogPostHandle::new(&adapter, PostRef::Name("hello".to_owned()));
        let err = handle.save().unwrap_err();

        assert!(matches!(err, HubSpotError::Unresolved(_)));
        assert!(adapter.api().calls().is_empty());
    }

    #[test]
    fn test_post_mut_unresolved() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let mut handle = BlogPostHandle::new(&adapter, PostRef::Id("1".to_owned()));
        assert!(matches!(handle.post_mut(), Err(HubSpotError::Unresolved(_))));
    }

    #[test]
    fn test_delete_post_confirmed() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new().with_post(existing_post()));
        let mut handle = BlogPostHandle::new(&adapter, PostRef::Name("hello".to_owned()))
            .with_autocreate(false);
        handle.load().unwrap();
        let deleted = handle.delete(Confirmation::Yes).unwrap();

        assert_eq!(deleted.map(|p| p.id), Some("12345".to_owned()));
        assert!(adapter.api().posts().is_empty());
    }

    #[test]
    fn test_delete_post_declined() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new().with_post(existing_post()));
        let mut handle = BlogPostHandle::new(&adapter, PostRef::Id("12345".to_owned()));
        handle.load().unwrap();

        assert_eq!(handle.delete(Confirmation::No).unwrap(), None);
        assert_eq!(adapter.api().posts().len(), 1);
    }

    #[test]
    fn test_post_display() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let handle = BlogPostHandle::new(&adapter, PostRef::Id("12345".to_owned()));
        assert_eq!(handle.to_string(), "BlogPost id=12345");
    }

    #[test]
    fn test_file_create_and_save() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let folder = FolderRef::Id("7".to_owned());
        let mut handle = FileHandle::new(
            &adapter,
            Path::new("/docs/report.pdf"),
            FileRef::Name("report.pdf".to_owned()),
            folder.clone(),
        );
        let id = handle.load().unwrap().id.clone();
        handle.save().unwrap();

        assert_eq!(
            adapter.api().calls(),
            vec![
                ApiCall::SearchFiles(crate::types::FileQuery::name_in_folder("report", "7")),
                ApiCall::UploadFile {
                    source: PathBuf::from("/docs/report.pdf"),
                    name: "report.pdf".to_owned(),
                    folder,
                },
                ApiCall::ReplaceFile {
                    id,
                    source: PathBuf::from("/docs/report.pdf"),
                },
            ]
        );
    }

    #[test]
    fn test_file_delete_unresolved() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let handle = FileHandle::new(
            &adapter,
            Path::new("a.pdf"),
            FileRef::Id("1".to_owned()),
            FolderRef::Id("7".to_owned()),
        );
        assert!(matches!(
            handle.delete(Confirmation::Yes),
            Err(HubSpotError::Unresolved(_))
        ));
    }
}
