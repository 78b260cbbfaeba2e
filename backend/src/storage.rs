//! File-backed ticket log.
//!
//! The manifest is a single JSON array. Each append reads the whole array, extends it and
//! writes it back. Appends are serialized through one lock, and the new content is written
//! to a sibling `.tmp` file that is then renamed over the manifest.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::StorageError;

#[derive(Clone)]
pub struct ManifestStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl ManifestStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Arc::new(path.as_ref().to_path_buf()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current manifest.
    ///
    /// A missing file is an empty log. A file that is not a JSON array is treated as empty
    /// and will be overwritten by the next append.
    pub async fn load(&self) -> Result<Vec<Value>, StorageError> {
        let bytes = match tokio::fs::read(self.path.as_path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{} not found, starting a new manifest", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.to_path_buf(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) => {
                warn!("{} is not an array, resetting to empty array", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => {
                warn!("{} is not valid JSON ({}), resetting to empty array", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    /// Append entries to the manifest and return the new total number of records
    pub async fn append(&self, entries: Vec<Value>) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut manifest = self.load().await?;
        let appended = entries.len();
        manifest.extend(entries);
        self.write_all(&manifest).await?;

        info!(
            "Appended {} entries to {} ({} total)",
            appended,
            self.path.display(),
            manifest.len()
        );
        Ok(manifest.len())
    }

    async fn write_all(&self, manifest: &[Value]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(manifest)?;
        let tmp_path = self.tmp_path();
        debug!("Writing {} bytes to {}", content.len(), tmp_path.display());

        tokio::fs::write(&tmp_path, content)
            .await
            .map_err(|source| StorageError::Write {
                path: tmp_path.clone(),
                source,
            })?;

        tokio::fs::rename(&tmp_path, self.path.as_path())
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.to_path_buf(),
                source,
            })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
