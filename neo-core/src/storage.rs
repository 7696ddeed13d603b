use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::TrackedItem;

/// User-scoped bookmarks keyed by `(user, id)`.
///
/// Implementations must be `Send + Sync`; callers hold them as
/// `Arc<dyn TrackedStore>` and never care which backend is active.
#[async_trait]
pub trait TrackedStore: Send + Sync {
    /// Adds `item` unless its `(user, id)` is already tracked, then returns
    /// every item of that user.
    async fn insert(&self, item: TrackedItem) -> Result<Vec<TrackedItem>, StoreError>;

    /// Drops the `(user, id)` bookmark if present and returns what is left.
    async fn remove(&self, user: &str, id: &str) -> Result<Vec<TrackedItem>, StoreError>;

    /// Items of `user` in insertion order.
    async fn list(&self, user: &str) -> Result<Vec<TrackedItem>, StoreError>;
}

/// Flat JSON document of every user's tracked items, or a purely in-memory
/// list when built with [`JsonTrackedStore::in_memory`].
#[derive(Debug, Clone)]
pub struct JsonTrackedStore {
    inner: Arc<RwLock<Vec<TrackedItem>>>,
    path: Option<PathBuf>,
}

impl JsonTrackedStore {
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
            path: None,
        }
    }

    /// Opens the store at `path`. A corrupt file falls back to the last
    /// temp write, then to an empty store.
    pub async fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let items = read_with_tmp_fallback(&path).await;
        debug!(count = items.len(), path = %path.display(), "loaded tracked items");
        Self {
            inner: Arc::new(RwLock::new(items)),
            path: Some(path),
        }
    }

    async fn persist(&self, items: &[TrackedItem]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            debug!("tracked store is in-memory only; skipping persist");
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(items)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = tmp_path(path);
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl TrackedStore for JsonTrackedStore {
    async fn insert(&self, item: TrackedItem) -> Result<Vec<TrackedItem>, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.iter().any(|t| t.key_matches(&item.user, &item.id)) {
            debug!(user = %item.user, id = %item.id, "item already tracked");
            return Ok(for_user(&inner, &item.user));
        }
        let user = item.user.clone();
        inner.push(item);
        if let Err(e) = self.persist(&inner).await {
            inner.pop();
            warn!(error = %e, "failed to persist tracked items");
            return Err(e);
        }
        Ok(for_user(&inner, &user))
    }

    async fn remove(&self, user: &str, id: &str) -> Result<Vec<TrackedItem>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.iter().position(|t| t.key_matches(user, id)) else {
            debug!(user, id, "item not tracked, nothing to remove");
            return Ok(for_user(&inner, user));
        };
        let removed = inner.remove(index);
        if let Err(e) = self.persist(&inner).await {
            inner.insert(index, removed);
            warn!(error = %e, "failed to persist tracked items");
            return Err(e);
        }
        Ok(for_user(&inner, user))
    }

    async fn list(&self, user: &str) -> Result<Vec<TrackedItem>, StoreError> {
        Ok(for_user(&*self.inner.read().await, user))
    }
}

fn for_user(items: &[TrackedItem], user: &str) -> Vec<TrackedItem> {
    items.iter().filter(|t| t.user == user).cloned().collect()
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

async fn read_with_tmp_fallback(path: &Path) -> Vec<TrackedItem> {
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "failed to parse tracked items, trying tmp fallback");
                match tokio::fs::read(tmp_path(path)).await {
                    Ok(tmp_bytes) => serde_json::from_slice(&tmp_bytes).unwrap_or_default(),
                    Err(_) => Vec::new(),
                }
            }
        },
        Err(_) => Vec::new(),
    }
}
