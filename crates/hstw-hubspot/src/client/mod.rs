//! HubSpot REST API client.
//!
//! Sync HTTP client for the CMS blog post and file manager APIs with
//! private app access token (bearer) authentication.

mod files;
mod multipart;
mod posts;

use std::path::Path;
use std::time::Duration;

use ureq::Agent;
use ureq::http::Response;

use crate::api::{FileUpload, HubSpotApi};
use crate::error::HubSpotError;
use crate::types::{BlogPost, File, FileQuery, NewBlogPost};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// HubSpot REST API client.
pub struct HubSpotClient {
    agent: Agent,
    base_url: String,
    access_token: String,
}

impl HubSpotClient {
    /// Create client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Config`] if the access token is empty.
    pub fn new(base_url: &str, access_token: &str) -> Result<Self, HubSpotError> {
        if access_token.is_empty() {
            return Err(HubSpotError::Config(
                "Communicating with the HubSpot API needs an access token".to_owned(),
            ));
        }

        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
        })
    }

    /// Absolute URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Turn error statuses into errors, returning the body otherwise.
///
/// `resource` names what was requested, for [`HubSpotError::NotFound`].
fn check_status(response: Response<ureq::Body>, resource: &str) -> Result<ureq::Body, HubSpotError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        if status == 404 {
            return Err(HubSpotError::NotFound(resource.to_owned()));
        }
        return Err(HubSpotError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body)
}

impl HubSpotApi for HubSpotClient {
    fn find_posts_by_name(&self, name: &str) -> Result<Vec<BlogPost>, HubSpotError> {
        self.find_posts_by_name(name)
    }

    fn get_post(&self, id: &str) -> Result<BlogPost, HubSpotError> {
        self.get_post(id)
    }

    fn create_post(&self, post: &NewBlogPost) -> Result<BlogPost, HubSpotError> {
        self.create_post(post)
    }

    fn update_post(&self, id: &str, post: &BlogPost) -> Result<BlogPost, HubSpotError> {
        self.update_post(id, post)
    }

    fn archive_post(&self, id: &str) -> Result<(), HubSpotError> {
        self.archive_post(id)
    }

    fn search_files(&self, query: &FileQuery) -> Result<Vec<File>, HubSpotError> {
        self.search_files(query)
    }

    fn get_file(&self, id: &str) -> Result<File, HubSpotError> {
        self.get_file(id)
    }

    fn upload_file(&self, upload: &FileUpload<'_>) -> Result<File, HubSpotError> {
        self.upload_file(upload)
    }

    fn replace_file(&self, id: &str, source: &Path) -> Result<File, HubSpotError> {
        self.replace_file(id, source)
    }

    fn archive_file(&self, id: &str) -> Result<(), HubSpotError> {
        self.archive_file(id)
    }
}
