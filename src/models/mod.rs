// src/models/mod.rs

//! Domain models for the StudyShelf client.
//!
//! These mirror the REST resource shapes served by the backend. Identifiers
//! are server-assigned opaque strings; the client never invents one except
//! for placeholder bookmarks while a create call is in flight.

mod blog;
mod bookmark;
mod collection;
mod config;
mod course;
mod material;
mod review;
mod user;

// Re-export all public types
pub use blog::{Blog, BlogUpdate, NewBlog};
pub use bookmark::Bookmark;
pub use collection::{Collection, CollectionNode, NewCollection, build_tree};
pub use config::{ApiConfig, Config, EnvironmentInfo, PagingConfig};
pub use course::{Course, Department, Faculty};
pub use material::{Material, MaterialKind, MaterialQuery, MaterialUpdate, NewMaterial};
pub use review::{ReviewRequest, ReviewStatus};
pub use user::{Role, User};

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// Whether more pages follow this one.
    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.per_page) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_has_next() {
        let page = Page {
            items: vec![1, 2, 3],
            page: 1,
            per_page: 3,
            total: 7,
        };
        assert!(page.has_next());

        let last = Page {
            items: vec![7],
            page: 3,
            per_page: 3,
            total: 7,
        };
        assert!(!last.has_next());
    }
}
