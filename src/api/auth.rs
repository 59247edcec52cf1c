// src/api/auth.rs

//! Authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::User;

/// Token and user returned by login-style endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct GoogleLoginRequest<'a> {
    id_token: &'a str,
}

#[derive(Serialize)]
struct PasswordResetRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct PasswordReset<'a> {
    token: &'a str,
    password: &'a str,
}

/// Log in with email and password.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthResponse> {
    client
        .post_json("auth/login", &LoginRequest { email, password })
        .await
}

/// Create an account and log in.
pub async fn signup(
    client: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<AuthResponse> {
    client
        .post_json(
            "auth/signup",
            &SignupRequest {
                name,
                email,
                password,
            },
        )
        .await
}

/// Exchange a Google ID token for a session.
pub async fn google_login(client: &ApiClient, id_token: &str) -> Result<AuthResponse> {
    client
        .post_json("auth/google", &GoogleLoginRequest { id_token })
        .await
}

/// Invalidate the current session token server-side.
pub async fn logout(client: &ApiClient) -> Result<()> {
    client.post_empty("auth/logout", &()).await
}

/// Ask the backend to mail a password-reset link.
pub async fn request_password_reset(client: &ApiClient, email: &str) -> Result<()> {
    client
        .post_empty("auth/password-reset/request", &PasswordResetRequest { email })
        .await
}

/// Redeem a password-reset token.
pub async fn reset_password(client: &ApiClient, token: &str, password: &str) -> Result<()> {
    client
        .post_empty("auth/password-reset", &PasswordReset { token, password })
        .await
}

/// Fetch the user attached to the current session token.
pub async fn current_user(client: &ApiClient) -> Result<User> {
    client.get_json("auth/me", &[]).await
}
