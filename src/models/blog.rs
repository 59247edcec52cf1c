//! Blog post data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::review::ReviewStatus;

/// A user-authored blog post.
///
/// Posts start out pending and become publicly visible once approved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    /// Server-assigned identifier
    pub id: String,

    /// Post title
    pub title: String,

    /// Markdown body
    pub body: String,

    /// Author user id
    pub author_id: String,

    /// Moderation state
    #[serde(default)]
    pub review_status: ReviewStatus,

    /// Moderator comment, set when the post was rejected
    #[serde(default)]
    pub review_comment: Option<String>,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a blog post.
#[derive(Debug, Clone, Serialize)]
pub struct NewBlog {
    pub title: String,
    pub body: String,
}

/// Partial update for a blog post; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_rejected_post_with_comment() {
        let json = r#"{
            "id": "b1",
            "title": "Exam survival guide",
            "body": "...",
            "author_id": "u1",
            "review_status": "rejected",
            "review_comment": "cites no sources",
            "created_at": "2026-03-01T10:00:00Z",
            "updated_at": "2026-03-02T08:00:00Z"
        }"#;
        let blog: Blog = serde_json::from_str(json).unwrap();
        assert_eq!(blog.review_status, ReviewStatus::Rejected);
        assert_eq!(blog.review_comment.as_deref(), Some("cites no sources"));
    }
}
