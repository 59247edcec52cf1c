// src/store/bookmarks.rs

//! Optimistic bookmark synchronization.
//!
//! Keeps a local bookmark list consistent with server state while giving
//! immediate feedback: a toggle mutates the list first, then issues the
//! REST call, and rolls the mutation back if the call fails. Failures are
//! surfaced through the [`Notifier`] and never retried.
//!
//! Toggles are serialized through the state mutex, which is held across the
//! network call: a rapid double-toggle on the same material resolves to the
//! pre-toggle state instead of racing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::api::BookmarkApi;
use crate::error::{AppError, Result};
use crate::models::{Bookmark, Material};
use crate::notify::{Notifier, Severity};

/// What a toggle did to the local list.
#[derive(Debug)]
pub enum ToggleOutcome {
    /// A bookmark was created; carries the server record.
    Added(Bookmark),

    /// An existing bookmark was removed.
    Removed(Bookmark),

    /// The call failed; the optimistic change was rolled back and the
    /// failure surfaced through the notifier.
    Failed(AppError),
}

impl ToggleOutcome {
    pub fn succeeded(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Local bookmark list kept in sync with the server.
pub struct BookmarkStore {
    api: Arc<dyn BookmarkApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<Vec<Bookmark>>,
    placeholder_seq: AtomicU64,
}

impl BookmarkStore {
    /// Create an empty store over the given transport and notifier.
    pub fn new(api: Arc<dyn BookmarkApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(Vec::new()),
            placeholder_seq: AtomicU64::new(1),
        }
    }

    /// Seed the list from a disk cache. Placeholders never belong in a
    /// cache; any that slipped in are dropped.
    pub async fn seed(&self, bookmarks: Vec<Bookmark>) {
        let mut state = self.state.lock().await;
        *state = bookmarks
            .into_iter()
            .filter(|b| !b.is_placeholder())
            .collect();
    }

    /// Replace the list with a fresh fetch. Last fetch wins.
    pub async fn refresh(&self) -> Result<Vec<Bookmark>> {
        let fetched = self.api.list().await?;
        let mut state = self.state.lock().await;
        *state = fetched.clone();
        Ok(fetched)
    }

    /// Current copy of the list.
    pub async fn snapshot(&self) -> Vec<Bookmark> {
        self.state.lock().await.clone()
    }

    /// The bookmark for a material, if one is present locally.
    pub async fn find(&self, material_id: &str) -> Option<Bookmark> {
        self.state
            .lock()
            .await
            .iter()
            .find(|b| b.material_id == material_id)
            .cloned()
    }

    /// Toggle the bookmark state of a material.
    ///
    /// Present: remove it optimistically, issue the delete, re-insert on
    /// failure. Absent: insert a placeholder record, issue the create,
    /// replace the placeholder with the server record on success, drop it
    /// on failure. Either failure path notifies and reports
    /// [`ToggleOutcome::Failed`]; the error is not propagated as `Err`
    /// because it has already been handled here.
    pub async fn toggle(&self, material: &Material) -> ToggleOutcome {
        let mut state = self.state.lock().await;

        if let Some(pos) = state.iter().position(|b| b.material_id == material.id) {
            let removed = state.remove(pos);
            match self.api.delete(&removed.id).await {
                Ok(()) => ToggleOutcome::Removed(removed),
                Err(error) => {
                    let pos = pos.min(state.len());
                    state.insert(pos, removed);
                    self.notifier.notify(
                        Severity::Error,
                        &format!(
                            "Could not remove bookmark for \"{}\": {}",
                            material.title, error
                        ),
                    );
                    ToggleOutcome::Failed(error)
                }
            }
        } else {
            let sequence = self.placeholder_seq.fetch_add(1, Ordering::Relaxed);
            let placeholder = Bookmark::placeholder(sequence, material);
            state.push(placeholder.clone());

            match self.api.create(&material.id).await {
                Ok(saved) => {
                    if let Some(slot) = state.iter_mut().find(|b| b.id == placeholder.id) {
                        *slot = saved.clone();
                    }
                    ToggleOutcome::Added(saved)
                }
                Err(error) => {
                    state.retain(|b| b.id != placeholder.id);
                    self.notifier.notify(
                        Severity::Error,
                        &format!("Could not bookmark \"{}\": {}", material.title, error),
                    );
                    ToggleOutcome::Failed(error)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaterialKind, ReviewStatus};
    use crate::notify::testing::RecordingNotifier;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::AtomicBool;

    fn material(id: &str) -> Material {
        Material {
            id: id.to_string(),
            title: format!("Material {id}"),
            description: String::new(),
            kind: MaterialKind::Pdf,
            url: format!("https://cdn.example.edu/{id}.pdf"),
            course_id: None,
            uploader_id: "u1".to_string(),
            review_status: ReviewStatus::Approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// In-memory transport with switchable failure modes.
    #[derive(Default)]
    struct FakeApi {
        server: Mutex<Vec<Bookmark>>,
        next_id: AtomicU64,
        fail_create: AtomicBool,
        fail_delete: AtomicBool,
    }

    impl FakeApi {
        async fn server_len(&self) -> usize {
            self.server.lock().await.len()
        }
    }

    #[async_trait]
    impl BookmarkApi for FakeApi {
        async fn list(&self) -> Result<Vec<Bookmark>> {
            Ok(self.server.lock().await.clone())
        }

        async fn create(&self, material_id: &str) -> Result<Bookmark> {
            if self.fail_create.load(Ordering::Relaxed) {
                return Err(AppError::api(500, "create failed"));
            }
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let bookmark = Bookmark {
                id: format!("bk_{id}"),
                material_id: material_id.to_string(),
                material_title: String::new(),
                created_at: Utc::now(),
            };
            self.server.lock().await.push(bookmark.clone());
            Ok(bookmark)
        }

        async fn delete(&self, bookmark_id: &str) -> Result<()> {
            if self.fail_delete.load(Ordering::Relaxed) {
                return Err(AppError::api(500, "delete failed"));
            }
            self.server.lock().await.retain(|b| b.id != bookmark_id);
            Ok(())
        }
    }

    fn store_with(api: Arc<FakeApi>) -> (Arc<BookmarkStore>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let store = Arc::new(BookmarkStore::new(api, notifier.clone()));
        (store, notifier)
    }

    #[tokio::test]
    async fn toggle_adds_and_replaces_placeholder() {
        let api = Arc::new(FakeApi::default());
        let (store, _) = store_with(api.clone());

        let outcome = store.toggle(&material("m1")).await;
        assert!(matches!(outcome, ToggleOutcome::Added(_)));

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot[0].is_placeholder());
        assert_eq!(api.server_len().await, 1);
    }

    #[tokio::test]
    async fn toggle_twice_returns_to_original_state() {
        let api = Arc::new(FakeApi::default());
        let (store, notifier) = store_with(api.clone());

        store.toggle(&material("m1")).await;
        store.toggle(&material("m1")).await;

        assert!(store.snapshot().await.is_empty());
        assert_eq!(api.server_len().await, 0);
        assert_eq!(notifier.errors(), 0);
    }

    #[tokio::test]
    async fn failed_create_removes_placeholder_and_notifies() {
        let api = Arc::new(FakeApi::default());
        api.fail_create.store(true, Ordering::Relaxed);
        let (store, notifier) = store_with(api.clone());

        let outcome = store.toggle(&material("m1")).await;
        assert!(!outcome.succeeded());
        assert!(store.snapshot().await.is_empty());
        assert_eq!(api.server_len().await, 0);
        assert_eq!(notifier.errors(), 1);
    }

    #[tokio::test]
    async fn failed_delete_restores_record_in_place() {
        let api = Arc::new(FakeApi::default());
        let (store, notifier) = store_with(api.clone());

        store.toggle(&material("m1")).await;
        store.toggle(&material("m2")).await;
        let before = store.snapshot().await;

        api.fail_delete.store(true, Ordering::Relaxed);
        let outcome = store.toggle(&material("m1")).await;

        assert!(!outcome.succeeded());
        assert_eq!(store.snapshot().await, before);
        assert_eq!(notifier.errors(), 1);
    }

    #[tokio::test]
    async fn concurrent_double_toggle_is_serialized() {
        let api = Arc::new(FakeApi::default());
        let (store, notifier) = store_with(api.clone());

        let m = material("m1");
        let (a, b) = tokio::join!(store.toggle(&m), store.toggle(&m));
        assert!(a.succeeded());
        assert!(b.succeeded());

        // One toggle added, the other removed; the order between them does
        // not matter, the end state does.
        assert!(store.snapshot().await.is_empty());
        assert_eq!(api.server_len().await, 0);
        assert_eq!(notifier.errors(), 0);
    }

    #[tokio::test]
    async fn seed_drops_stale_placeholders() {
        let api = Arc::new(FakeApi::default());
        let (store, _) = store_with(api);

        let m = material("m1");
        let cached = vec![
            Bookmark {
                id: "bk_7".to_string(),
                material_id: "m7".to_string(),
                material_title: String::new(),
                created_at: Utc::now(),
            },
            Bookmark::placeholder(99, &m),
        ];
        store.seed(cached).await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "bk_7");
    }

    #[tokio::test]
    async fn refresh_replaces_local_state() {
        let api = Arc::new(FakeApi::default());
        let (store, _) = store_with(api.clone());

        // Server gains a bookmark the store has never seen.
        api.create("m3").await.unwrap();

        let fetched = store.refresh().await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(store.snapshot().await, fetched);
    }
}
