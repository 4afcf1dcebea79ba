//! HubSpot API types.

mod file;
mod post;

use serde::Deserialize;

pub use file::{File, FileOptions, FileQuery};
pub use post::{BlogPost, NewBlogPost};

/// Paged collection response.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionResponse<T> {
    /// Total number of matches across all pages.
    #[serde(default)]
    pub total: Option<u64>,
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}
