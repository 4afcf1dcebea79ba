//! Upload and delete workflows.

use std::path::Path;

use hstw_hubspot::{
    BlogPost, BlogPostHandle, Confirmation, File, FileHandle, FileRef, FolderRef, HubSpotAdapter,
    HubSpotApi, HubSpotError, PostRef,
};
use hstw_renderer::{ImageTranslator, ImageUploader};
use tracing::{info, warn};

use crate::content_type::ContentTypeResolver;
use crate::convert::convert_text;
use crate::error::PublishError;
use crate::source::{Source, SourceReader};

/// What to upload, and where.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Document or file to upload.
    pub source: Source,
    /// Post or file name. Defaults to the file stem for posts and the file
    /// name for files.
    pub name: Option<String>,
    /// Blog to create new posts in.
    pub content_group_id: Option<String>,
    /// Folder for files and post images.
    pub folder: Option<FolderRef>,
}

/// Result of an upload.
#[derive(Debug, Clone)]
pub enum Uploaded {
    /// Saved blog post.
    Post(BlogPost),
    /// Saved file.
    File(File),
}

/// Which files to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTarget {
    /// The file with this ID.
    Id(String),
    /// Every file at this path.
    Path(String),
}

/// Stores post images as HubSpot files in a folder.
pub struct HubSpotImageUploader<'a, A> {
    adapter: &'a HubSpotAdapter<A>,
    folder: &'a FolderRef,
}

impl<'a, A: HubSpotApi> HubSpotImageUploader<'a, A> {
    /// Uploader into `folder`.
    #[must_use]
    pub fn new(adapter: &'a HubSpotAdapter<A>, folder: &'a FolderRef) -> Self {
        Self { adapter, folder }
    }
}

impl<A: HubSpotApi> ImageUploader for HubSpotImageUploader<'_, A> {
    type Error = HubSpotError;

    fn upload(&self, source: &Path, name: &str) -> Result<String, HubSpotError> {
        info!("Uploading file: {}", source.display());
        let file = upload_file(self.adapter, source, name, self.folder)?;
        file.url
            .ok_or_else(|| HubSpotError::Unresolved(format!("File has no public URL: {name}")))
    }
}

/// Publish a document as blog post, or any other file as HubSpot file.
///
/// Text sources are converted (markup) or taken verbatim (HTML), their local
/// images uploaded when a folder is given, and the post named `name` is
/// loaded or created and saved with the new body.
///
/// # Errors
///
/// Returns [`PublishError`] for unreadable sources, unknown text formats,
/// failed image uploads and API errors.
pub fn upload<A: HubSpotApi>(
    adapter: &HubSpotAdapter<A>,
    reader: &SourceReader,
    request: &UploadRequest,
) -> Result<Uploaded, PublishError> {
    let source = &request.source;
    let ctr = ContentTypeResolver::new(&source.name());
    info!("Uploading file: {source}");

    if ctr.is_text() {
        let html = if ctr.is_markup() {
            info!("Converting to HTML: {source}");
            convert_text(&reader.read(source)?)
        } else if ctr.is_html() {
            reader.read(source)?
        } else {
            return Err(PublishError::UnknownContentType(ctr.suffix().to_owned()));
        };

        let html = match &request.folder {
            Some(folder) => translate_images(adapter, html, source.local_path(), folder)?,
            None => {
                warn!("Images will not be uploaded, please supply folder id or folder name");
                html
            }
        };

        let name = request
            .name
            .clone()
            .or_else(|| source.stem())
            .ok_or_else(|| PublishError::Config(format!("Unable to derive a post name from {source}")))?;
        let mut post = BlogPostHandle::new(adapter, PostRef::Name(name))
            .with_content_group_id(request.content_group_id.clone());
        post.load()?.post_body = Some(html);
        return Ok(Uploaded::Post(post.save()?));
    }

    let Some(path) = source.local_path() else {
        return Err(PublishError::Config(format!(
            "Uploading files needs a local path: {source}"
        )));
    };
    let folder = match &request.folder {
        Some(folder) => folder.clone(),
        None => FolderRef::from_options(None, None)?,
    };
    let name = request
        .name
        .clone()
        .or_else(|| source.file_name())
        .ok_or_else(|| PublishError::Config(format!("Unable to derive a file name from {source}")))?;
    Ok(Uploaded::File(upload_file(adapter, path, &name, &folder)?))
}

/// Load or create the file `name` in `folder`, then replace its content.
fn upload_file<A: HubSpotApi>(
    adapter: &HubSpotAdapter<A>,
    source: &Path,
    name: &str,
    folder: &FolderRef,
) -> Result<File, HubSpotError> {
    let mut file = FileHandle::new(adapter, source, FileRef::Name(name.to_owned()), folder.clone());
    file.load()?;
    file.save()
}

fn translate_images<A: HubSpotApi>(
    adapter: &HubSpotAdapter<A>,
    html: String,
    source_path: Option<&Path>,
    folder: &FolderRef,
) -> Result<String, PublishError> {
    let uploader = HubSpotImageUploader::new(adapter, folder);
    let mut translator = ImageTranslator::new(html, source_path);
    translator.discover();
    translator.process(Some(&uploader))?;
    Ok(translator.into_html())
}

/// Archive a blog post after confirmation.
///
/// A post that is missing, or vanishes before archival, is logged and
/// tolerated.
///
/// # Errors
///
/// Returns API errors other than a missing post.
pub fn delete_blogpost<A: HubSpotApi>(
    adapter: &HubSpotAdapter<A>,
    reference: PostRef,
    confirmation: Confirmation,
) -> Result<Option<BlogPost>, PublishError> {
    match &reference {
        PostRef::Id(id) => info!("Deleting blog post with id '{id}'"),
        PostRef::Name(name) => info!("Deleting blog post with name '{name}'"),
    }

    let description = reference.to_string();
    let mut post = BlogPostHandle::new(adapter, reference).with_autocreate(false);
    match load_and_delete(&mut post, confirmation) {
        Err(HubSpotError::NotFound(_)) => {
            warn!("Blog post not found: {description}");
            Ok(None)
        }
        result => Ok(result?),
    }
}

fn load_and_delete<A: HubSpotApi>(
    post: &mut BlogPostHandle<'_, A>,
    confirmation: Confirmation,
) -> Result<Option<BlogPost>, HubSpotError> {
    post.load()?;
    post.delete(confirmation)
}

/// Archive files by ID or path after confirmation.
///
/// Returns the archived files.
///
/// # Errors
///
/// Returns API errors.
pub fn delete_file<A: HubSpotApi>(
    adapter: &HubSpotAdapter<A>,
    target: &FileTarget,
    confirmation: Confirmation,
) -> Result<Vec<File>, PublishError> {
    match target {
        FileTarget::Id(id) => {
            info!("Deleting file with id '{id}'");
            Ok(adapter
                .delete_file_by_id(id, confirmation)?
                .into_iter()
                .collect())
        }
        FileTarget::Path(path) => {
            info!("Deleting files at path '{path}'");
            Ok(adapter.delete_files_by_path(path, confirmation)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use hstw_hubspot::{ApiCall, FileQuery, MockHubSpot, NewBlogPost};

    use super::*;
    use pretty_assertions::assert_eq;

    fn markdown_source(dir: &Path, content: &str) -> Source {
        let path = dir.join("hello.md");
        std::fs::write(&path, content).unwrap();
        Source::Path(path)
    }

    fn request(source: Source) -> UploadRequest {
        UploadRequest {
            source,
            name: None,
            content_group_id: Some("678".to_owned()),
            folder: None,
        }
    }

    #[test]
    fn test_upload_markdown_creates_then_updates() {
        let dir = tempfile::tempdir().unwrap();
        let source = markdown_source(dir.path(), "## About\n\nHello.\n");
        let adapter = HubSpotAdapter::new(MockHubSpot::new());

        let uploaded = upload(&adapter, &SourceReader::new(), &request(source)).unwrap();

        let Uploaded::Post(post) = uploaded else {
            panic!("expected a blog post");
        };
        let body = post.post_body.unwrap();
        assert!(body.contains(r#"<h2 id="about">About <a class="headerlink""#));

        let calls = adapter.api().calls();
        assert_eq!(
            calls[..2],
            [
                ApiCall::FindPostsByName("hello".to_owned()),
                ApiCall::CreatePost(NewBlogPost::new("hello", "678")),
            ]
        );
        assert_eq!(
            calls[2],
            ApiCall::UpdatePost {
                id: post.id,
                post_body: Some(body),
            }
        );
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn test_upload_existing_post_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = markdown_source(dir.path(), "Hello.\n");
        let adapter = HubSpotAdapter::new(MockHubSpot::new().with_post(BlogPost {
            id: "12345".to_owned(),
            name: "greeting".to_owned(),
            ..BlogPost::default()
        }));
        let request = UploadRequest {
            name: Some("greeting".to_owned()),
            content_group_id: None,
            ..request(source)
        };

        upload(&adapter, &SourceReader::new(), &request).unwrap();

        let body = adapter.api().posts()[0].post_body.clone().unwrap();
        assert!(body.starts_with("<p>Hello.</p>\n"));
        assert!(matches!(
            adapter.api().calls().last(),
            Some(ApiCall::UpdatePost { id, .. }) if id == "12345"
        ));
    }

    #[test]
    fn test_upload_post_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/bar.png"), b"PNG").unwrap();
        let source = markdown_source(dir.path(), "![Bar](images/bar.png)\n");
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let request = UploadRequest {
            folder: Some(FolderRef::Path("/blog".to_owned())),
            ..request(source)
        };

        let Uploaded::Post(post) = upload(&adapter, &SourceReader::new(), &request).unwrap() else {
            panic!("expected a blog post");
        };

        let body = post.post_body.unwrap();
        assert!(body.contains(r#"src="https://mock.hubspot.invalid/hubfs/bar.png""#));
        assert!(!body.contains("images/bar.png"));

        let calls = adapter.api().calls();
        assert_eq!(calls[0], ApiCall::SearchFiles(FileQuery::path("/blog/bar.png")));
        assert_eq!(
            calls[1],
            ApiCall::UploadFile {
                source: dir.path().join("images/bar.png"),
                name: "bar.png".to_owned(),
                folder: FolderRef::Path("/blog".to_owned()),
            }
        );
        assert!(matches!(calls[2], ApiCall::ReplaceFile { .. }));
        assert_eq!(calls[3], ApiCall::FindPostsByName("hello".to_owned()));
    }

    #[test]
    fn test_upload_raw_html_block_with_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bar.png"), b"PNG").unwrap();
        let source = markdown_source(
            dir.path(),
            "<div class=\"note\">Q&A session</div>\n\n![Bar](bar.png)\n",
        );
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let request = UploadRequest {
            folder: Some(FolderRef::Path("/blog".to_owned())),
            ..request(source)
        };

        let Uploaded::Post(post) = upload(&adapter, &SourceReader::new(), &request).unwrap() else {
            panic!("expected a blog post");
        };

        let body = post.post_body.unwrap();
        assert!(body.contains("Q&A session"));
        assert!(body.contains(r#"src="https://mock.hubspot.invalid/hubfs/bar.png""#));
        assert!(matches!(
            adapter.api().calls().last(),
            Some(ApiCall::UpdatePost { .. })
        ));
    }

    #[test]
    fn test_upload_without_folder_keeps_images() {
        let dir = tempfile::tempdir().unwrap();
        let source = markdown_source(dir.path(), "![Bar](images/bar.png)\n");
        let adapter = HubSpotAdapter::new(MockHubSpot::new());

        let Uploaded::Post(post) = upload(&adapter, &SourceReader::new(), &request(source)).unwrap()
        else {
            panic!("expected a blog post");
        };

        assert!(post.post_body.unwrap().contains(r#"src="images/bar.png""#));
        assert!(
            !adapter
                .api()
                .calls()
                .iter()
                .any(|c| matches!(c, ApiCall::SearchFiles(_) | ApiCall::UploadFile { .. }))
        );
    }

    #[test]
    fn test_upload_html_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p>Raw</p>").unwrap();
        let adapter = HubSpotAdapter::new(MockHubSpot::new());

        let Uploaded::Post(post) =
            upload(&adapter, &SourceReader::new(), &request(Source::Path(path))).unwrap()
        else {
            panic!("expected a blog post");
        };

        assert_eq!(post.name, "page");
        assert_eq!(post.post_body.as_deref(), Some("<p>Raw</p>"));
    }

    #[test]
    fn test_upload_plain_text_rejected() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let source = Source::Path(PathBuf::from("/docs/notes.txt"));

        let err = upload(&adapter, &SourceReader::new(), &request(source)).unwrap_err();

        assert_eq!(err.to_string(), "Unknown file type: .txt");
        assert!(adapter.api().calls().is_empty());
    }

    #[test]
    fn test_upload_binary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let request = UploadRequest {
            folder: Some(FolderRef::Id("7".to_owned())),
            ..request(Source::Path(path.clone()))
        };

        let Uploaded::File(file) = upload(&adapter, &SourceReader::new(), &request).unwrap() else {
            panic!("expected a file");
        };

        assert_eq!(file.name, "report");
        assert_eq!(
            adapter.api().calls()[1],
            ApiCall::UploadFile {
                source: path,
                name: "report.pdf".to_owned(),
                folder: FolderRef::Id("7".to_owned()),
            }
        );
    }

    #[test]
    fn test_upload_binary_file_needs_folder() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let source = Source::Path(PathBuf::from("/docs/report.pdf"));

        let err = upload(&adapter, &SourceReader::new(), &request(source)).unwrap_err();

        assert!(err.to_string().starts_with("Folder is required for uploading files"));
        assert!(adapter.api().calls().is_empty());
    }

    #[test]
    fn test_delete_blogpost_by_id() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new().with_post(BlogPost {
            id: "12345".to_owned(),
            name: "hello".to_owned(),
            ..BlogPost::default()
        }));

        let deleted = delete_blogpost(
            &adapter,
            PostRef::Id("12345".to_owned()),
            Confirmation::Yes,
        )
        .unwrap();

        assert_eq!(deleted.map(|p| p.id), Some("12345".to_owned()));
        assert_eq!(
            adapter.api().calls(),
            vec![
                ApiCall::GetPost("12345".to_owned()),
                ApiCall::ArchivePost("12345".to_owned()),
            ]
        );
    }

    #[test]
    fn test_delete_missing_blogpost_tolerated() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());

        let deleted =
            delete_blogpost(&adapter, PostRef::Name("gone".to_owned()), Confirmation::Yes)
                .unwrap();

        assert_eq!(deleted, None);
        assert!(
            !adapter
                .api()
                .calls()
                .iter()
                .any(|c| matches!(c, ApiCall::CreatePost(_)))
        );
    }

    #[test]
    fn test_delete_file_by_path() {
        let file = File {
            id: "9".to_owned(),
            name: "bar".to_owned(),
            path: Some("/blog/bar.png".to_owned()),
            ..File::default()
        };
        let adapter = HubSpotAdapter::new(MockHubSpot::new().with_file(file));

        let deleted = delete_file(
            &adapter,
            &FileTarget::Path("/blog/bar.png".to_owned()),
            Confirmation::Yes,
        )
        .unwrap();

        assert_eq!(deleted.len(), 1);
        assert!(adapter.api().files().is_empty());
    }

    #[test]
    fn test_delete_file_by_id_missing() {
        let adapter = HubSpotAdapter::new(MockHubSpot::new());
        let deleted =
            delete_file(&adapter, &FileTarget::Id("9".to_owned()), Confirmation::Yes).unwrap();
        assert!(deleted.is_empty());
    }
}
