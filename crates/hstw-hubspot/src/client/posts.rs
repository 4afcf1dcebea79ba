//! Blog post operations for HubSpot API.

use tracing::{debug, info};

use super::{HubSpotClient, check_status};
use crate::error::HubSpotError;
use crate::types::{BlogPost, CollectionResponse, NewBlogPost};

const POSTS_PATH: &str = "/cms/v3/blogs/posts";

impl HubSpotClient {
    /// Find blog posts by exact name.
    pub(crate) fn find_posts_by_name(&self, name: &str) -> Result<Vec<BlogPost>, HubSpotError> {
        debug!("Searching blog posts named '{}'", name);

        let response = self
            .agent
            .get(&self.url(POSTS_PATH))
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .query("name", name)
            .call()?;

        let mut body = check_status(response, &format!("blog post named '{name}'"))?;
        let collection: CollectionResponse<BlogPost> = body.read_json()?;
        Ok(collection.results)
    }

    /// Get blog post by ID.
    pub(crate) fn get_post(&self, id: &str) -> Result<BlogPost, HubSpotError> {
        info!("Getting blog post {}", id);

        let response = self
            .agent
            .get(&self.url(&format!("{POSTS_PATH}/{id}")))
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call()?;

        let mut body = check_status(response, &format!("blog post id={id}"))?;
        Ok(body.read_json()?)
    }

    /// Create a draft blog post.
    pub(crate) fn create_post(&self, post: &NewBlogPost) -> Result<BlogPost, HubSpotError> {
        info!(
            "Creating blog post '{}' in content group {}",
            post.name, post.content_group_id
        );

        let response = self
            .agent
            .post(&self.url(POSTS_PATH))
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .send_json(post)?;

        let mut body = check_status(response, "blog posts")?;
        Ok(body.read_json()?)
    }

    /// Update a blog post with the full post object.
    pub(crate) fn update_post(&self, id: &str, post: &BlogPost) -> Result<BlogPost, HubSpotError> {
        info!("Updating blog post {}", id);

        let payload = serde_json::to_vec(post)?;
        let response = self
            .agent
            .patch(&self.url(&format!("{POSTS_PATH}/{id}")))
            .header("Authorization", &self.auth_header())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        let mut body = check_status(response, &format!("blog post id={id}"))?;
        Ok(body.read_json()?)
    }

    /// Archive a blog post.
    pub(crate) fn archive_post(&self, id: &str) -> Result<(), HubSpotError> {
        info!("Archiving blog post {}", id);

        let response = self
            .agent
            .delete(&self.url(&format!("{POSTS_PATH}/{id}")))
            .header("Authorization", &self.auth_header())
            .call()?;

        check_status(response, &format!("blog post id={id}"))?;
        Ok(())
    }
}
