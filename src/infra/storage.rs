//! Key-value persistence with whole-document semantics: a value is always replaced, never patched.

use std::{collections::HashMap, io::ErrorKind};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Could not access '{key}' in the store: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not read or write '{key}' as JSON: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Stored '{key}' is not valid: {reason}")]
    Corrupt { key: String, reason: String },
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError>;
    async fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

pub async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    store
        .get(key)
        .await?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| PersistenceError::Serde {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
}

pub async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let raw = serde_json::to_string(value).map_err(|source| PersistenceError::Serde {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, raw).await
}

//------------------------- File Store ----------------------------

/// One `<key>.json` file per key. Writes go to a temporary file first and are renamed into place
/// so a reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: Utf8PathBuf,
}

impl FileStore {
    pub async fn open(directory: impl Into<Utf8PathBuf>) -> Result<Self, PersistenceError> {
        let directory = directory.into();
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|source| PersistenceError::Io {
                key: directory.to_string(),
                source,
            })?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Utf8PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        key: key.to_owned(),
        source,
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
        let path = self.path_for(key);
        let temporary = self.directory.join(format!("{key}.json.tmp"));
        tokio::fs::write(&temporary, value)
            .await
            .map_err(io_error(key))?;
        tokio::fs::rename(&temporary, &path)
            .await
            .map_err(io_error(key))?;
        debug!("Wrote {path}.");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}

//------------------------- Memory Store ----------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
        self.values.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

//-------------------------- Tests -------------------------------
