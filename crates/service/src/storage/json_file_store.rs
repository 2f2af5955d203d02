use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Generic JSON file-backed collection store.
///
/// Persists a `Vec<T>` as one pretty-printed JSON array. Nothing is held in
/// memory: `load` reads the file on every call and `save` replaces it
/// wholesale. There is no locking, so concurrent writers race and the last
/// `save` wins.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    file_path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonFileStore<T> {
    fn clone(&self) -> Self {
        Self { file_path: self.file_path.clone(), _records: PhantomData }
    }
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _records: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the whole collection.
    ///
    /// A missing, unreadable or unparseable file yields an empty collection;
    /// no error reaches the caller.
    pub async fn load(&self) -> Vec<T> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "data file missing; treating as empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "data file unreadable; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "data file malformed; treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace the file contents with `records`.
    ///
    /// Writes a sibling temp file and renames it over the target, so readers
    /// see either the old or the new document.
    pub async fn save(&self, records: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(records)?;
        let tmp = self.temp_path();
        if let Err(e) = fs::write(&tmp, &data).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!(path = %self.file_path.display(), records = records.len(), bytes = data.len(), "data file saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.json".to_string());
        self.file_path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4()))
    }
}
