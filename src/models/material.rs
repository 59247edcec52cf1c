//! Study material data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::review::ReviewStatus;

/// What kind of resource a material points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Pdf,
    Video,
    Image,
    Article,
    Link,
}

impl MaterialKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Video => "video",
            Self::Image => "image",
            Self::Article => "article",
            Self::Link => "link",
        }
    }
}

/// An uploaded or linked study resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Server-assigned identifier
    pub id: String,

    /// Material title
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Resource kind
    pub kind: MaterialKind,

    /// Download or external URL
    pub url: String,

    /// Course this material belongs to, if any
    #[serde(default)]
    pub course_id: Option<String>,

    /// User who uploaded the material
    pub uploader_id: String,

    /// Moderation state
    #[serde(default)]
    pub review_status: ReviewStatus,

    /// Upload time
    pub created_at: DateTime<Utc>,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a material.
///
/// `url` is set for link-style materials; file uploads send the file as a
/// multipart part alongside this payload instead.
#[derive(Debug, Clone, Serialize)]
pub struct NewMaterial {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub kind: MaterialKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
}

/// Partial update for a material; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaterialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
}

/// Query parameters for material listings.
#[derive(Debug, Clone, Default)]
pub struct MaterialQuery {
    /// Restrict to one course
    pub course_id: Option<String>,

    /// Restrict to courses of one faculty
    pub faculty_id: Option<String>,

    /// Full-text search term
    pub search: Option<String>,

    /// 1-based page number
    pub page: Option<u32>,

    /// Page size
    pub per_page: Option<u32>,
}

impl MaterialQuery {
    /// Render the query as URL parameter pairs, skipping unset fields.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(course) = &self.course_id {
            pairs.push(("course".to_string(), course.clone()));
        }
        if let Some(faculty) = &self.faculty_id {
            pairs.push(("faculty".to_string(), faculty.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        pairs
    }
}
