//! Config Store: sole owner of the shared application state.
//!
//! Every read and write of operator data goes through the store's
//! `RwLock`. Writes to disk are serialized by a second lock and always
//! snapshot the latest in-memory state, so concurrent locale changes can
//! not interleave partial documents.

use hubctl_core::{config::AppState, error::HubError};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock, RwLockReadGuard};
use tracing::{error, info, warn};

pub struct ConfigStore {
    state: RwLock<AppState>,
    path: PathBuf,
    persist_lock: Mutex<()>,
}

impl ConfigStore {
    pub fn new(state: AppState, path: impl Into<PathBuf>) -> Self {
        Self {
            state: RwLock::new(state),
            path: path.into(),
            persist_lock: Mutex::new(()),
        }
    }

    /// Load the document at `path` and take ownership of it.
    pub fn open(path: &Path) -> Result<Self, HubError> {
        let state = hubctl_core::config::load(path)?;
        for warning in state.validate() {
            warn!("config: {warning}");
        }
        Ok(Self::new(state, path))
    }

    /// Shared read access. Hold the guard only as long as needed.
    pub async fn read(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().await
    }

    pub async fn is_authorized(&self, chat_id: i64) -> bool {
        self.state.read().await.is_authorized(chat_id)
    }

    pub async fn is_admin(&self, chat_id: i64) -> bool {
        self.state.read().await.is_admin(chat_id)
    }

    /// Script prefix for a registered service.
    pub async fn service_path(&self, name: &str) -> Option<String> {
        self.state.read().await.service(name).map(|s| s.path.clone())
    }

    /// Change an operator's locale and write the whole document back.
    ///
    /// Returns `false` if the operator is unknown. A failed write is logged
    /// and the in-memory change stays in effect.
    pub async fn set_locale(&self, chat_id: i64, locale: &str) -> bool {
        {
            let mut state = self.state.write().await;
            match state.whitelist.get_mut(&chat_id) {
                Some(op) => op.locale = locale.to_string(),
                None => return false,
            }
        }
        info!("operator {chat_id} switched locale to {locale}");

        if let Err(e) = self.persist().await {
            error!("failed to persist config to {}: {e}", self.path.display());
        }
        true
    }

    /// Write the current state to disk via a temporary sibling file.
    pub async fn persist(&self) -> Result<(), HubError> {
        let _guard = self.persist_lock.lock().await;
        let bytes = self.state.read().await.to_json()?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubctl_core::config::Operator;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_path() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "__hubctl_store_test_{}_{}__",
            std::process::id(),
            id
        ));
        let _ = std::fs::create_dir_all(&dir);
        dir.join("config.json")
    }

    fn state_with(ids: &[i64]) -> AppState {
        let mut state = AppState::default();
        for id in ids {
            state.whitelist.insert(
                *id,
                Operator {
                    username: format!("op{id}"),
                    locale: "en".into(),
                },
            );
        }
        state
    }

    #[tokio::test]
    async fn test_set_locale_updates_and_persists() {
        let path = temp_path();
        let store = ConfigStore::new(state_with(&[1]), &path);

        assert!(store.set_locale(1, "it").await);
        assert_eq!(store.read().await.operator(1).unwrap().locale, "it");

        let on_disk = hubctl_core::config::load(&path).unwrap();
        assert_eq!(on_disk.operator(1).unwrap().locale, "it");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_set_locale_unknown_operator() {
        let path = temp_path();
        let store = ConfigStore::new(state_with(&[1]), &path);
        assert!(!store.set_locale(2, "it").await);
        assert!(!path.exists(), "nothing to persist for unknown operators");
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_memory_change() {
        let path = std::env::temp_dir()
            .join("__hubctl_no_such_dir__")
            .join("deeper")
            .join("config.json");
        let store = ConfigStore::new(state_with(&[1]), &path);

        assert!(store.set_locale(1, "it").await);
        assert_eq!(store.read().await.operator(1).unwrap().locale, "it");
        assert!(store.persist().await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_locale_changes_leave_consistent_document() {
        let path = temp_path();
        let ids: Vec<i64> = (1..=20).collect();
        let store = Arc::new(ConfigStore::new(state_with(&ids), &path));

        let mut handles = Vec::new();
        for id in ids.clone() {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.set_locale(id, "it").await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let on_disk = hubctl_core::config::load(&path).unwrap();
        assert_eq!(on_disk, *store.read().await);
        assert!(on_disk.whitelist.values().all(|op| op.locale == "it"));
    }

    #[tokio::test]
    async fn test_open_reads_document() {
        let path = temp_path();
        std::fs::write(
            &path,
            r#"{"adminTelegramId": 1, "whitelist": {"1": {"username": "a", "locale": "en"}},
                "hub": {"web": {"path": "/srv/web/"}}}"#,
        )
        .unwrap();
        let store = ConfigStore::open(&path).unwrap();
        assert!(store.is_admin(1).await);
        assert!(store.is_authorized(1).await);
        assert_eq!(store.service_path("web").await.as_deref(), Some("/srv/web/"));
        assert_eq!(store.service_path("db").await, None);
        assert_eq!(store.path(), path.as_path());
    }
}
