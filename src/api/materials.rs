// src/api/materials.rs

//! Material endpoints: browsing, upload, and moderation.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::client::ApiClient;
use crate::error::{AppError, Result};
use crate::models::{Material, MaterialQuery, MaterialUpdate, NewMaterial, Page, ReviewRequest};

/// List materials matching the query.
pub async fn list(client: &ApiClient, query: &MaterialQuery) -> Result<Page<Material>> {
    client.get_json("materials", &query.to_pairs()).await
}

/// Fetch one material.
pub async fn get(client: &ApiClient, id: &str) -> Result<Material> {
    client.get_json(&format!("materials/{id}"), &[]).await
}

/// Create a link-style material (no file payload).
///
/// Fails client-side when `new.url` is unset; file-backed materials go
/// through [`upload`] instead.
pub async fn create_link(client: &ApiClient, new: &NewMaterial) -> Result<Material> {
    if new.url.is_none() {
        return Err(AppError::validation(
            "link materials require a url; use upload for files",
        ));
    }
    client.post_json("materials", new).await
}

/// Upload a file-backed material as a multipart form.
///
/// The metadata travels as a JSON part named `material`, the file as a part
/// named `file` with a content type guessed from the extension.
pub async fn upload(client: &ApiClient, new: &NewMaterial, file: &Path) -> Result<Material> {
    let bytes = tokio::fs::read(file).await?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation("upload path has no usable file name"))?
        .to_string();
    let mime = mime_guess::from_path(file).first_or_octet_stream();

    let metadata = Part::text(serde_json::to_string(new)?).mime_str("application/json")?;
    let file_part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())?;

    let form = Form::new().part("material", metadata).part("file", file_part);
    client.post_multipart("materials", form).await
}

/// Update material metadata.
pub async fn update(client: &ApiClient, id: &str, update: &MaterialUpdate) -> Result<Material> {
    client.put_json(&format!("materials/{id}"), update).await
}

/// Delete a material.
pub async fn delete(client: &ApiClient, id: &str) -> Result<()> {
    client.delete(&format!("materials/{id}")).await
}

/// List materials awaiting moderation.
pub async fn list_pending(client: &ApiClient, page: Option<u32>) -> Result<Page<Material>> {
    let mut pairs = vec![("status".to_string(), "pending".to_string())];
    if let Some(page) = page {
        pairs.push(("page".to_string(), page.to_string()));
    }
    client.get_json("materials", &pairs).await
}

/// Approve a pending material.
pub async fn approve(client: &ApiClient, id: &str) -> Result<Material> {
    client
        .put_json(&format!("materials/{id}/review"), &ReviewRequest::approve())
        .await
}

/// Reject a pending material. The comment must be non-empty.
pub async fn reject(client: &ApiClient, id: &str, comment: &str) -> Result<Material> {
    let request = ReviewRequest::reject(comment)?;
    client
        .put_json(&format!("materials/{id}/review"), &request)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterialKind;

    #[test]
    fn create_link_requires_url() {
        let new = NewMaterial {
            title: "Slides".to_string(),
            description: String::new(),
            kind: MaterialKind::Link,
            url: None,
            course_id: None,
        };
        let config = crate::models::Config::default();
        let client = ApiClient::new(&config).unwrap();
        let err = futures::executor::block_on(create_link(&client, &new)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
