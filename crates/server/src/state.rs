use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Process configuration, fixed at startup.
///
/// Request input never feeds these paths; the storage root is where every
/// resolved filename lands.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the server listens on.
    pub port: u16,
    /// Directory holding the spreadsheet files.
    pub storage_root: PathBuf,
    /// Directory of static assets served at the root path.
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3000,
            storage_root: PathBuf::from("storage"),
            public_dir: PathBuf::from("public"),
        }
    }
}

/// Shared state handed to every handler.
///
/// Cheap to clone; the lock map serializes mutating operations that target
/// the same resolved path, so two concurrent appends to one file cannot
/// interleave their read-modify-write sequences.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    config: ServerConfig,
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        AppState {
            inner: Arc::new(Inner {
                config,
                locks: Mutex::new(HashMap::new()),
            }),
        }
    }

    #[must_use]
    pub fn storage_root(&self) -> &Path {
        &self.inner.config.storage_root
    }

    /// Acquire the per-path lock for a mutating operation.
    ///
    /// The guard holds the lock until dropped. Entries are never evicted;
    /// the map grows with the set of distinct filenames seen, which stays
    /// small for a flat storage directory.
    pub async fn lock_path(&self, path: &Path) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.locks.lock().await;
            locks
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_path_serializes() {
        let state = AppState::new(ServerConfig::default());
        let path = Path::new("storage/a.xlsx");

        let guard = state.lock_path(path).await;
        // A second acquisition on the same path must not succeed while the
        // first guard is held.
        let pending = {
            let state = state.clone();
            let path = path.to_path_buf();
            tokio::spawn(async move {
                let _guard = state.lock_path(&path).await;
            })
        };
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        drop(guard);
        pending.await.unwrap();
    }

    #[tokio::test]
    async fn test_distinct_paths_do_not_block() {
        let state = AppState::new(ServerConfig::default());

        let _a = state.lock_path(Path::new("storage/a.xlsx")).await;
        // Completes immediately because it is a different key.
        let _b = state.lock_path(Path::new("storage/b.xlsx")).await;
    }
}
