//! Object-store contracts for artwork image bytes.
//!
//! # Responsibility
//! - Define the put/public-url/remove boundary of the object store.
//! - Own storage-key derivation on upload and key recovery on delete.
//!
//! # Invariants
//! - Keys are single path segments: no `/`, no `\`, not `.` or `..`.
//! - `put` never silently overwrites an existing key.
//! - `remove` of a missing key succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

mod filesystem;

pub use filesystem::FileSystemObjectStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Object-store failures.
#[derive(Debug)]
pub enum StorageError {
    InvalidKey(String),
    AlreadyExists(String),
    Io {
        operation: &'static str,
        key: String,
        source: std::io::Error,
    },
    /// Failure reported by a non-filesystem store implementation.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid object key `{key}`"),
            Self::AlreadyExists(key) => write!(f, "object `{key}` already exists"),
            Self::Io {
                operation,
                key,
                source,
            } => write!(f, "{operation} `{key}` failed: {source}"),
            Self::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Object store holding image bytes under flat keys.
pub trait ObjectStore {
    /// Writes `bytes` under `key`. Fails if the key is already taken.
    fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<()>;
    /// Public locator for `key`. Pure; does not check existence.
    fn public_url(&self, key: &str) -> String;
    /// Deletes the object under `key`.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Builds the storage key for a new upload: `<timestamp_ms>-<file_name>`.
pub fn derive_storage_key(timestamp_ms: u128, file_name: &str) -> String {
    format!("{timestamp_ms}-{file_name}")
}

/// Recovers the storage key from a public URL: the text after the last `/`.
///
/// Returns `None` when that segment is empty.
pub fn storage_key_from_reference(image_reference: &str) -> Option<&str> {
    image_reference
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Milliseconds since the Unix epoch, `0` if the clock is before it.
pub fn now_epoch_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}

pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\'])
        || key.contains('\0');
    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
