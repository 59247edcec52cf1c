// src/client.rs

//! HTTP client wrapper for the StudyShelf REST API.
//!
//! Every per-resource module in [`crate::api`] goes through [`ApiClient`]:
//! it owns the base URL of the active environment, injects the session's
//! bearer token, and decodes non-success responses into [`AppError::Api`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Error body shape the backend uses for non-success responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Shared HTTP client for all resource calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the configuration's active environment.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.api.user_agent)
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        // A trailing slash keeps Url::join from eating the last path segment.
        let mut raw = config.api.base_url()?.to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)?;

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Attach a session bearer token to subsequent requests.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Whether a session token is attached.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Resolve a resource path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Attach auth, send, and map non-success statuses to errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::auth(message));
        }
        Err(AppError::api(status.as_u16(), message))
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let mut request = self.http.get(self.endpoint(path)?);
        if !query.is_empty() {
            request = request.query(query);
        }
        Ok(self.send(request).await?.json().await?)
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.http.post(self.endpoint(path)?).json(body);
        Ok(self.send(request).await?.json().await?)
    }

    /// POST a JSON body, ignoring the response body.
    pub async fn post_empty<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let request = self.http.post(self.endpoint(path)?).json(body);
        self.send(request).await?;
        Ok(())
    }

    /// PUT a JSON body and decode a JSON response.
    pub async fn put_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.http.put(self.endpoint(path)?).json(body);
        Ok(self.send(request).await?.json().await?)
    }

    /// DELETE a resource, ignoring the response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.http.delete(self.endpoint(path)?);
        self.send(request).await?;
        Ok(())
    }

    /// POST a multipart form and decode a JSON response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let request = self.http.post(self.endpoint(path)?).multipart(form);
        Ok(self.send(request).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> ApiClient {
        let mut config = Config::default();
        config.api.environments[0].base_url = base.to_string();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn endpoint_joins_under_base_path() {
        let client = client_for("https://api.example.edu/v1");
        let url = client.endpoint("materials/m1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.edu/v1/materials/m1");
    }

    #[test]
    fn endpoint_tolerates_leading_slash() {
        let client = client_for("https://api.example.edu/v1/");
        let url = client.endpoint("/bookmarks").unwrap();
        assert_eq!(url.as_str(), "https://api.example.edu/v1/bookmarks");
    }

    #[test]
    fn token_state_is_tracked() {
        let client = client_for("https://api.example.edu/v1");
        assert!(!client.has_token());
        let client = client.with_token(Some("tok".to_string()));
        assert!(client.has_token());
    }

    #[test]
    fn error_body_prefers_message_field() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message": "no such course", "error": "x"}"#).unwrap();
        assert_eq!(body.message.or(body.error).as_deref(), Some("no such course"));
    }
}
