//! Bookmark data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::material::Material;

/// Prefix of client-generated placeholder ids. Server ids are opaque but
/// never carry this prefix.
const PLACEHOLDER_PREFIX: &str = "local-";

/// A user's bookmark on a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Server-assigned identifier, or a `local-` placeholder while the
    /// create call is in flight
    pub id: String,

    /// Bookmarked material
    pub material_id: String,

    /// Material title, denormalized for display
    #[serde(default)]
    pub material_title: String,

    /// Bookmark creation time
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// Synthesize a placeholder record for an optimistic insert.
    pub fn placeholder(sequence: u64, material: &Material) -> Self {
        Self {
            id: format!("{PLACEHOLDER_PREFIX}{sequence}"),
            material_id: material.id.clone(),
            material_title: material.title.clone(),
            created_at: Utc::now(),
        }
    }

    /// Whether this record is still a client-side placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.id.starts_with(PLACEHOLDER_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaterialKind, ReviewStatus};

    fn sample_material(id: &str) -> Material {
        Material {
            id: id.to_string(),
            title: format!("Material {id}"),
            description: String::new(),
            kind: MaterialKind::Pdf,
            url: format!("https://cdn.example.edu/{id}.pdf"),
            course_id: None,
            uploader_id: "u1".to_string(),
            review_status: ReviewStatus::Approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn placeholder_roundtrip() {
        let material = sample_material("m9");
        let bookmark = Bookmark::placeholder(3, &material);
        assert!(bookmark.is_placeholder());
        assert_eq!(bookmark.id, "local-3");
        assert_eq!(bookmark.material_id, "m9");
    }

    #[test]
    fn server_ids_are_not_placeholders() {
        let bookmark = Bookmark {
            id: "bk_01HZX".to_string(),
            material_id: "m1".to_string(),
            material_title: String::new(),
            created_at: Utc::now(),
        };
        assert!(!bookmark.is_placeholder());
    }
}
