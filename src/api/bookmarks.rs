// src/api/bookmarks.rs

//! Bookmark endpoints and the transport seam used by the bookmark store.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Bookmark;

#[derive(Serialize)]
struct CreateBookmarkRequest<'a> {
    material_id: &'a str,
}

/// List the caller's bookmarks.
pub async fn list(client: &ApiClient) -> Result<Vec<Bookmark>> {
    client.get_json("bookmarks", &[]).await
}

/// Bookmark a material; the server returns the stored record.
pub async fn create(client: &ApiClient, material_id: &str) -> Result<Bookmark> {
    client
        .post_json("bookmarks", &CreateBookmarkRequest { material_id })
        .await
}

/// Remove a bookmark by its id.
pub async fn delete(client: &ApiClient, bookmark_id: &str) -> Result<()> {
    client.delete(&format!("bookmarks/{bookmark_id}")).await
}

/// Transport trait for bookmark calls.
///
/// The optimistic store in [`crate::store::bookmarks`] talks to the API only
/// through this trait, so tests can stand in failing transports.
#[async_trait]
pub trait BookmarkApi: Send + Sync {
    /// Fetch the full bookmark list.
    async fn list(&self) -> Result<Vec<Bookmark>>;

    /// Create a bookmark for a material.
    async fn create(&self, material_id: &str) -> Result<Bookmark>;

    /// Delete a bookmark by id.
    async fn delete(&self, bookmark_id: &str) -> Result<()>;
}

#[async_trait]
impl BookmarkApi for ApiClient {
    async fn list(&self) -> Result<Vec<Bookmark>> {
        list(self).await
    }

    async fn create(&self, material_id: &str) -> Result<Bookmark> {
        create(self, material_id).await
    }

    async fn delete(&self, bookmark_id: &str) -> Result<()> {
        delete(self, bookmark_id).await
    }
}
