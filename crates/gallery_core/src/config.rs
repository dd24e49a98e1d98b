//! Runtime configuration loaded from `GALLERY_*` environment variables.
//!
//! # Invariants
//! - Every field has a default, so an empty environment is valid.
//! - `public_base_url` must not be blank.

use crate::db::{open_db, DbError};
use crate::logging::default_log_level;
use crate::storage::{FileSystemObjectStore, StorageError};
use rusqlite::Connection;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const ENV_PREFIX: &str = "GALLERY_";
const DB_FILE_NAME: &str = "gallery.sqlite3";
const OBJECTS_DIR_NAME: &str = "objects";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080/storage/artworks";

#[derive(Debug)]
pub enum ConfigError {
    Env(envy::Error),
    BlankPublicBaseUrl,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env(err) => write!(f, "invalid {ENV_PREFIX}* environment: {err}"),
            Self::BlankPublicBaseUrl => write!(f, "{ENV_PREFIX}PUBLIC_BASE_URL must not be blank"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Env(err) => Some(err),
            Self::BlankPublicBaseUrl => None,
        }
    }
}

/// Failure opening the configured backend.
#[derive(Debug)]
pub enum BackendOpenError {
    Db(DbError),
    Storage(StorageError),
}

impl Display for BackendOpenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "record store open failed: {err}"),
            Self::Storage(err) => write!(f, "object store open failed: {err}"),
        }
    }
}

impl Error for BackendOpenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_log_level_owned")]
    pub log_level: String,
    /// Logging stays off when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            public_base_url: default_public_base_url(),
            log_level: default_log_level_owned(),
            log_dir: None,
        }
    }
}

impl GalleryConfig {
    /// Reads `GALLERY_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Reads configuration from explicit `(name, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(ConfigError::Env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.public_base_url.trim().is_empty() {
            return Err(ConfigError::BlankPublicBaseUrl);
        }
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.data_dir.join(OBJECTS_DIR_NAME)
    }

    /// Opens the record-store connection and the object store.
    ///
    /// The connection is returned by value so callers can lend it to a
    /// `SqliteArtworkRepository`.
    pub fn open_backend(&self) -> Result<(Connection, FileSystemObjectStore), BackendOpenError> {
        let conn = open_db(self.db_path()).map_err(BackendOpenError::Db)?;
        let objects = FileSystemObjectStore::new(self.objects_dir(), &self.public_base_url)
            .map_err(BackendOpenError::Storage)?;
        Ok((conn, objects))
    }
}

fn default_data_dir() -> PathBuf {
    std::env::temp_dir().join("gallery")
}

fn default_public_base_url() -> String {
    DEFAULT_PUBLIC_BASE_URL.to_string()
}

fn default_log_level_owned() -> String {
    default_log_level().to_string()
}
