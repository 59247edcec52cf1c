// src/api/faculties.rs

//! Faculty and department endpoints.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Department, Faculty};

/// List all faculties.
pub async fn list(client: &ApiClient) -> Result<Vec<Faculty>> {
    client.get_json("faculties", &[]).await
}

/// List the departments of a faculty.
pub async fn departments(client: &ApiClient, faculty_id: &str) -> Result<Vec<Department>> {
    client
        .get_json(&format!("faculties/{faculty_id}/departments"), &[])
        .await
}
