//! HubSpot blog post types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// HubSpot blog post.
///
/// Fields not modelled here are kept in `extra` so a full update sends the
/// post back as it was received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Post ID.
    pub id: String,
    /// Internal post name.
    #[serde(default)]
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Blog (content group) the post belongs to.
    #[serde(default)]
    pub content_group_id: Option<String>,
    /// HTML body.
    #[serde(default)]
    pub post_body: Option<String>,
    /// Public URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Publishing state, e.g. `DRAFT`.
    #[serde(default)]
    pub state: Option<String>,
    /// Creation timestamp; never sent back.
    #[serde(default, skip_serializing)]
    pub created: Option<String>,
    /// Update timestamp; never sent back.
    #[serde(default, skip_serializing)]
    pub updated: Option<String>,
    /// Remaining fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    /// Internal post name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Blog (content group) to create the post in.
    pub content_group_id: String,
}

impl NewBlogPost {
    /// New post whose slug equals its name.
    #[must_use]
    pub fn new(name: &str, content_group_id: &str) -> Self {
        Self {
            name: name.to_owned(),
            slug: name.to_owned(),
            content_group_id: content_group_id.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let post: BlogPost = serde_json::from_value(json!({
            "id": "12345",
            "name": "hello",
            "contentGroupId": "678",
            "postBody": "<p>x</p>",
            "created": "2023-01-01T00:00:00Z",
            "updated": "2023-01-02T00:00:00Z",
            "authorName": "Ann",
        }))
        .unwrap();

        assert_eq!(post.id, "12345");
        assert_eq!(post.content_group_id.as_deref(), Some("678"));
        assert_eq!(post.extra.get("authorName"), Some(&json!("Ann")));
    }

    #[test]
    fn test_serialize_drops_timestamps() {
        let post = BlogPost {
            id: "1".to_owned(),
            name: "n".to_owned(),
            created: Some("2023-01-01T00:00:00Z".to_owned()),
            updated: Some("2023-01-02T00:00:00Z".to_owned()),
            ..BlogPost::default()
        };
        let value = serde_json::to_value(&post).unwrap();

        assert!(value.get("created").is_none());
        assert!(value.get("updated").is_none());
        assert_eq!(value["name"], json!("n"));
    }

    #[test]
    fn test_new_blog_post_payload() {
        let value = serde_json::to_value(NewBlogPost::new("hello", "678")).unwrap();
        assert_eq!(
            value,
            json!({"name": "hello", "slug": "hello", "contentGroupId": "678"})
        );
    }
}
