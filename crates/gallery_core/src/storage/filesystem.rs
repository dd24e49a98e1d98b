//! Directory-backed object store.
//!
//! Objects live as flat files under one root directory. Writes go to a
//! uniquely named temp file first and are published with a hard link, so a
//! reader never sees a partial object and an existing key is never replaced.

use super::{validate_key, ObjectStore, StorageError, StorageResult};
use log::{info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const TEMP_PREFIX: &str = ".incoming-";

/// Object store rooted at a local directory.
///
/// Public URLs are `<public_base_url>/<key>`; serving the directory under
/// that base is left to whatever hosts it.
#[derive(Debug, Clone)]
pub struct FileSystemObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl FileSystemObjectStore {
    /// Creates the store, creating `root` if it does not exist.
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> StorageResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            operation: "create_dir",
            key: root.display().to_string(),
            source,
        })?;

        info!(
            "event=object_store_open module=storage status=ok root={}",
            root.display()
        );
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for `key`; callers validate the key first.
    pub fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStore for FileSystemObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        let path = self.object_path(key);
        let temp_path = self.root.join(format!("{TEMP_PREFIX}{}", Uuid::new_v4()));

        std::fs::write(&temp_path, bytes).map_err(|source| StorageError::Io {
            operation: "write",
            key: key.to_string(),
            source,
        })?;

        let published = std::fs::hard_link(&temp_path, &path);
        if let Err(err) = std::fs::remove_file(&temp_path) {
            warn!(
                "event=object_put module=storage status=warn key={key} temp_cleanup_error={err}"
            );
        }

        match published {
            Ok(()) => {
                info!(
                    "event=object_put module=storage status=ok key={key} size={}",
                    bytes.len()
                );
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                Err(StorageError::AlreadyExists(key.to_string()))
            }
            Err(source) => Err(StorageError::Io {
                operation: "publish",
                key: key.to_string(),
                source,
            }),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        match std::fs::remove_file(self.object_path(key)) {
            Ok(()) => {
                info!("event=object_remove module=storage status=ok key={key}");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=object_remove module=storage status=ok key={key} missing=true");
                Ok(())
            }
            Err(source) => Err(StorageError::Io {
                operation: "remove",
                key: key.to_string(),
                source,
            }),
        }
    }
}
