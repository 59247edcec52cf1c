// src/api/collections.rs

//! Collection endpoints.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Collection, NewCollection};

#[derive(Serialize)]
struct RenameRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct AddMaterialRequest<'a> {
    material_id: &'a str,
}

#[derive(Serialize)]
struct ParentRequest<'a> {
    // Serialized even when None: clearing the parent sends an explicit null.
    parent_id: Option<&'a str>,
}

/// List the caller's collections (flat; nesting lives in `parent_id`).
pub async fn list_mine(client: &ApiClient) -> Result<Vec<Collection>> {
    client.get_json("collections", &[]).await
}

/// Fetch one collection.
pub async fn get(client: &ApiClient, id: &str) -> Result<Collection> {
    client.get_json(&format!("collections/{id}"), &[]).await
}

/// Create a collection, optionally nested under a parent.
pub async fn create(client: &ApiClient, new: &NewCollection) -> Result<Collection> {
    client.post_json("collections", new).await
}

/// Rename a collection.
pub async fn rename(client: &ApiClient, id: &str, name: &str) -> Result<Collection> {
    client
        .put_json(&format!("collections/{id}"), &RenameRequest { name })
        .await
}

/// Delete a collection. Children are re-parented by the server.
pub async fn delete(client: &ApiClient, id: &str) -> Result<()> {
    client.delete(&format!("collections/{id}")).await
}

/// Add a material to a collection.
pub async fn add_material(
    client: &ApiClient,
    collection_id: &str,
    material_id: &str,
) -> Result<Collection> {
    client
        .post_json(
            &format!("collections/{collection_id}/materials"),
            &AddMaterialRequest { material_id },
        )
        .await
}

/// Remove a material from a collection.
pub async fn remove_material(
    client: &ApiClient,
    collection_id: &str,
    material_id: &str,
) -> Result<()> {
    client
        .delete(&format!("collections/{collection_id}/materials/{material_id}"))
        .await
}

/// Move a collection under a new parent.
///
/// Cycle prevention is server-side; a refused move comes back as an API
/// error for the caller to surface.
pub async fn set_parent(
    client: &ApiClient,
    id: &str,
    parent_id: Option<&str>,
) -> Result<Collection> {
    client
        .put_json(&format!("collections/{id}/parent"), &ParentRequest { parent_id })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_parent_sends_explicit_null() {
        let json = serde_json::to_string(&ParentRequest { parent_id: None }).unwrap();
        assert_eq!(json, r#"{"parent_id":null}"#);
    }
}
