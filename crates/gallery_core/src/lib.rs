//! Core domain logic for the artwork gallery.
//! This crate is the single source of truth for upload, listing and
//! deletion invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod workflow;

pub use config::{BackendOpenError, ConfigError, GalleryConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::artwork::{
    normalize_handle, Artwork, ArtworkId, ArtworkValidationError, NewArtwork,
};
pub use repo::artwork_repo::{ArtworkRepository, RepoError, RepoResult, SqliteArtworkRepository};
pub use service::gallery_service::{
    confirmation_matches, DeletionError, DeletionReport, GalleryService, SelectedFile,
    UploadError,
};
pub use storage::{
    derive_storage_key, storage_key_from_reference, FileSystemObjectStore, ObjectStore,
    StorageError, StorageResult,
};
pub use workflow::deletion_flow::{DeletionFlow, DeletionState};
pub use workflow::gallery_view::{GalleryView, Notice, DELETED_NOTICE, NOTICE_TTL};
pub use workflow::page::GalleryPage;
pub use workflow::upload_form::UploadForm;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
