//! HubSpot CMS integration for hstw.
//!
//! This crate provides:
//! - [`HubSpotClient`]: sync REST client for blog posts and the file manager
//! - [`HubSpotAdapter`]: lookup-or-create and confirmed deletion on top of any
//!   [`HubSpotApi`] implementation
//! - [`BlogPostHandle`] and [`FileHandle`]: load, edit, save and delete single
//!   resources
//! - [`MockHubSpot`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use hstw_hubspot::{BlogPostHandle, HubSpotAdapter, HubSpotClient, PostRef};
//!
//! let client = HubSpotClient::new("https://api.hubapi.com", "pat-...")?;
//! let adapter = HubSpotAdapter::new(client);
//! let mut post = BlogPostHandle::new(&adapter, PostRef::Name("hello".into()))
//!     .with_content_group_id(Some("12345".into()));
//! post.load()?.post_body = Some("<p>Hello</p>".into());
//! post.save()?;
//! ```

mod adapter;
mod api;
mod client;
mod confirm;
mod entity;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod refs;
mod types;

pub use adapter::HubSpotAdapter;
pub use api::{FileUpload, HubSpotApi};
pub use client::HubSpotClient;
pub use confirm::Confirmation;
pub use entity::{BlogPostHandle, FileHandle};
pub use error::HubSpotError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{ApiCall, MockHubSpot};
pub use refs::{FileRef, FolderRef, PostRef};
pub use types::{BlogPost, CollectionResponse, File, FileOptions, FileQuery, NewBlogPost};
