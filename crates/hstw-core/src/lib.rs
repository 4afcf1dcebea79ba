//! Workflows behind the `hstw` command line.
//!
//! - [`convert`]: Markdown source to HubSpot-ready HTML
//! - [`LinkChecker`]: verify links and images of a document and its rendering
//! - [`upload`]: publish a document as blog post, or any file to the file manager
//! - [`delete_blogpost`] and [`delete_file`]: archive resources after confirmation
//!
//! Sources are local paths, `http(s)://` URLs or `github+https://` URLs, see
//! [`Source`].

mod content_type;
mod convert;
mod error;
mod linkcheck;
mod publish;
mod source;

pub use content_type::ContentTypeResolver;
pub use convert::{convert, convert_text};
pub use error::{PublishError, SourceError};
pub use linkcheck::{
    LinkChecker, LinkKind, LinkReport, LinkResult, LinkStatus, LinkcheckOptions,
    html_links, markdown_links,
};
pub use publish::{
    FileTarget, HubSpotImageUploader, UploadRequest, Uploaded, delete_blogpost, delete_file,
    upload,
};
pub use source::{GitHubLocation, Source, SourceReader};
