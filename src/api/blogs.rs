// src/api/blogs.rs

//! Blog endpoints: authoring and moderation.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Blog, BlogUpdate, NewBlog, Page, ReviewRequest};

/// List approved blog posts.
pub async fn list(client: &ApiClient, page: Option<u32>) -> Result<Page<Blog>> {
    let pairs = match page {
        Some(page) => vec![("page".to_string(), page.to_string())],
        None => Vec::new(),
    };
    client.get_json("blogs", &pairs).await
}

/// List the caller's own posts, whatever their review state.
pub async fn list_mine(client: &ApiClient) -> Result<Vec<Blog>> {
    client.get_json("blogs/mine", &[]).await
}

/// Fetch one post.
pub async fn get(client: &ApiClient, id: &str) -> Result<Blog> {
    client.get_json(&format!("blogs/{id}"), &[]).await
}

/// Create a post; it enters the review queue as pending.
pub async fn create(client: &ApiClient, new: &NewBlog) -> Result<Blog> {
    client.post_json("blogs", new).await
}

/// Update a post's title or body.
pub async fn update(client: &ApiClient, id: &str, update: &BlogUpdate) -> Result<Blog> {
    client.put_json(&format!("blogs/{id}"), update).await
}

/// Delete a post.
pub async fn delete(client: &ApiClient, id: &str) -> Result<()> {
    client.delete(&format!("blogs/{id}")).await
}

/// List posts awaiting moderation.
pub async fn list_pending(client: &ApiClient, page: Option<u32>) -> Result<Page<Blog>> {
    let mut pairs = vec![("status".to_string(), "pending".to_string())];
    if let Some(page) = page {
        pairs.push(("page".to_string(), page.to_string()));
    }
    client.get_json("blogs", &pairs).await
}

/// Approve a pending post.
pub async fn approve(client: &ApiClient, id: &str) -> Result<Blog> {
    client
        .put_json(&format!("blogs/{id}/review"), &ReviewRequest::approve())
        .await
}

/// Reject a pending post. The comment must be non-empty.
pub async fn reject(client: &ApiClient, id: &str, comment: &str) -> Result<Blog> {
    let request = ReviewRequest::reject(comment)?;
    client
        .put_json(&format!("blogs/{id}/review"), &request)
        .await
}
