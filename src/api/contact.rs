// src/api/contact.rs

//! Contact-form email endpoint.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::{AppError, Result};

/// A contact-form submission relayed by the backend's email endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Send a contact message. Refused client-side when the body is empty.
pub async fn send(client: &ApiClient, message: &ContactMessage) -> Result<()> {
    if message.message.trim().is_empty() {
        return Err(AppError::validation("contact message must not be empty"));
    }
    client.post_empty("contact", message).await
}
