// src/storage/mod.rs

//! Disk persistence for client-side state.
//!
//! The client holds no authoritative data; everything under the storage
//! root is a cache of the last fetch plus the active session:
//!
//! ```text
//! storage/
//! ├── config.toml       # Client configuration
//! ├── session.json      # Active session (token + user)
//! └── bookmarks.json    # Last-known bookmark list
//! ```

pub mod local;

// Re-export for convenience
pub use local::LocalStorage;

/// Storage key of the persisted session.
pub const SESSION_KEY: &str = "session.json";

/// Storage key of the cached bookmark list.
pub const BOOKMARKS_KEY: &str = "bookmarks.json";
