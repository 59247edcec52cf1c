// src/store/session.rs

//! Auth session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::auth::AuthResponse;
use crate::error::Result;
use crate::models::User;
use crate::storage::{LocalStorage, SESSION_KEY};

/// A logged-in session: the bearer token and the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent with every authenticated request
    pub token: String,

    /// User the token belongs to, as last fetched
    pub user: User,

    /// When this session was stored
    pub saved_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a login-style response.
    pub fn from_auth(auth: AuthResponse) -> Self {
        Self {
            token: auth.token,
            user: auth.user,
            saved_at: Utc::now(),
        }
    }
}

/// Persisted session cache. Consecutive CLI runs stay logged in through it.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: LocalStorage,
}

impl SessionStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Load the stored session, if any.
    pub async fn load(&self) -> Result<Option<Session>> {
        self.storage.read_json(SESSION_KEY).await
    }

    /// Store a session, replacing any previous one. Last fetch wins.
    pub async fn save(&self, session: &Session) -> Result<()> {
        self.storage.write_json(SESSION_KEY, session).await
    }

    /// Forget the stored session.
    pub async fn clear(&self) -> Result<()> {
        self.storage.remove(SESSION_KEY).await
    }
}
