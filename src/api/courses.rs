// src/api/courses.rs

//! Course catalogue endpoints.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Course;

/// List courses, optionally restricted to one department.
pub async fn list(client: &ApiClient, department_id: Option<&str>) -> Result<Vec<Course>> {
    let pairs = match department_id {
        Some(dept) => vec![("department".to_string(), dept.to_string())],
        None => Vec::new(),
    };
    client.get_json("courses", &pairs).await
}

/// Fetch one course.
pub async fn get(client: &ApiClient, id: &str) -> Result<Course> {
    client.get_json(&format!("courses/{id}"), &[]).await
}
