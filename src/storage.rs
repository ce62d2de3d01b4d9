use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::error;

/// Storage key names. `count` and `goal` are partitioned by day; the rest
/// are singletons.
pub mod keys {
    use crate::day::DayKey;

    pub const HISTORY: &str = "scripture_history";
    pub const THEME: &str = "scripture_theme_color";
    pub const TOTAL: &str = "scripture_total";

    pub fn count(day: &DayKey) -> String {
        format!("count_{day}")
    }

    pub fn goal(day: &DayKey) -> String {
        format!("goal_{day}")
    }
}

#[derive(Debug)]
pub struct PersistenceError(pub String);

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "persistence failure: {}", self.0)
    }
}

impl std::error::Error for PersistenceError {}

/// Durable key-value store. The session only ever touches storage through
/// this contract; a write that fails is logged by the caller and the
/// in-memory state stays authoritative.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError>;
    async fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// File-backed store: one JSON object on disk mapping keys to string values,
/// rewritten in full on every mutation.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Reads the backing file, falling back to an empty map on a missing or
    /// corrupt file rather than failing startup.
    pub async fn open(path: PathBuf) -> Self {
        let entries = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => map,
                Err(err) => {
                    error!("failed to parse data file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read data file: {err}");
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    async fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        let payload =
            serde_json::to_vec_pretty(entries).map_err(|err| PersistenceError(err.to_string()))?;
        fs::write(&self.path, payload)
            .await
            .map_err(|err| PersistenceError(err.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value);
        self.flush(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&entries).await
    }
}

/// Volatile store, used by the unit tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

pub fn resolve_default_theme() -> String {
    env::var("APP_THEME_DEFAULT").unwrap_or_else(|_| "saffron".to_string())
}

pub async fn open_store(path: &Path) -> FileStore {
    FileStore::open(path.to_path_buf()).await
}
