//! Gallery use-case service.
//!
//! # Responsibility
//! - Orchestrate the object store and record store for upload, listing and
//!   deletion.
//! - Enforce local validation and the handle confirmation gate before any
//!   backend call.
//!
//! # Invariants
//! - Upload writes the object before the record; a failed object write
//!   never produces a record.
//! - Deletion removes the record before the object; a failed record delete
//!   never touches the object.
//! - No compensation: a failed record write leaves the object orphaned and
//!   a failed object remove leaves it orphaned after the record is gone.

use crate::model::artwork::{Artwork, ArtworkId, NewArtwork};
use crate::repo::artwork_repo::{ArtworkRepository, RepoError, RepoResult};
use crate::storage::{
    derive_storage_key, now_epoch_ms, storage_key_from_reference, ObjectStore, StorageError,
};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Image file picked by the user, held in memory until upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original file name, without directories.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a file from disk, keeping only its final path component as name.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("`{}` has no file name", path.display()),
                )
            })?;
        Ok(Self::new(name, std::fs::read(path)?))
    }
}

/// Upload failures, in the order the workflow can hit them.
#[derive(Debug)]
pub enum UploadError {
    /// Handle is empty or whitespace-only.
    MissingHandle,
    /// No file was selected.
    MissingFile,
    /// The form already has an upload in flight.
    InProgress,
    /// Object store rejected the bytes; nothing was persisted.
    ObjectWriteFailed { key: String, source: StorageError },
    /// Record insert failed after the object was stored.
    RecordWriteFailed { key: String, source: RepoError },
}

impl UploadError {
    /// Short message suitable for the upload form.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingHandle => "Please enter your X username.".to_string(),
            Self::MissingFile => "Please select an image file to upload.".to_string(),
            Self::InProgress => "An upload is already in progress.".to_string(),
            Self::ObjectWriteFailed { source, .. } => format!("Upload failed: {source}"),
            Self::RecordWriteFailed { .. } => "Could not save artwork. Please try again.".to_string(),
        }
    }
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHandle => write!(f, "handle must not be blank"),
            Self::MissingFile => write!(f, "no file selected"),
            Self::InProgress => write!(f, "an upload is already in progress"),
            Self::ObjectWriteFailed { key, source } => {
                write!(f, "object write for `{key}` failed: {source}")
            }
            Self::RecordWriteFailed { key, source } => {
                write!(f, "record write for object `{key}` failed: {source}")
            }
        }
    }
}

impl Error for UploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ObjectWriteFailed { source, .. } => Some(source),
            Self::RecordWriteFailed { source, .. } => Some(source),
            Self::MissingHandle | Self::MissingFile | Self::InProgress => None,
        }
    }
}

/// Deletion failures and warnings.
#[derive(Debug)]
pub enum DeletionError {
    /// No deletion target is awaiting confirmation.
    NothingPending,
    /// Confirmation text does not equal the target handle.
    HandleMismatch,
    /// Record delete failed; record and object are untouched.
    RecordDeleteFailed { id: ArtworkId, source: RepoError },
    /// Object remove failed after the record was deleted. Non-fatal.
    ObjectDeleteFailed { key: String, source: StorageError },
}

impl DeletionError {
    /// Short message suitable for a blocking notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::NothingPending => "Select an artwork to delete first.".to_string(),
            Self::HandleMismatch => "Username did not match. Deletion cancelled.".to_string(),
            Self::RecordDeleteFailed { .. } => {
                "Could not delete artwork. Please try again.".to_string()
            }
            Self::ObjectDeleteFailed { .. } => {
                "Artwork deleted, but its image could not be removed.".to_string()
            }
        }
    }
}

impl Display for DeletionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingPending => write!(f, "no deletion is pending confirmation"),
            Self::HandleMismatch => write!(f, "confirmation does not match owner handle"),
            Self::RecordDeleteFailed { id, source } => {
                write!(f, "record delete for artwork {id} failed: {source}")
            }
            Self::ObjectDeleteFailed { key, source } => {
                write!(f, "object remove for `{key}` failed: {source}")
            }
        }
    }
}

impl Error for DeletionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RecordDeleteFailed { source, .. } => Some(source),
            Self::ObjectDeleteFailed { source, .. } => Some(source),
            Self::NothingPending | Self::HandleMismatch => None,
        }
    }
}

/// Outcome of a deletion whose record delete succeeded.
#[derive(Debug)]
pub struct DeletionReport {
    pub artwork_id: ArtworkId,
    /// Key derived from the image reference, if one could be derived.
    pub storage_key: Option<String>,
    /// `ObjectDeleteFailed` when the backing object may be orphaned.
    pub warning: Option<DeletionError>,
}

impl DeletionReport {
    /// True when both the record and its object are gone.
    pub fn is_clean(&self) -> bool {
        self.storage_key.is_some() && self.warning.is_none()
    }
}

/// Returns whether `confirmation` re-enters `target`'s handle exactly.
///
/// Surrounding whitespace is ignored; case and the `@` prefix are not.
pub fn confirmation_matches(target: &Artwork, confirmation: &str) -> bool {
    confirmation.trim() == target.owner_handle
}

/// Use-case service over one record store and one object store.
pub struct GalleryService<R: ArtworkRepository, S: ObjectStore> {
    records: R,
    objects: S,
}

impl<R: ArtworkRepository, S: ObjectStore> GalleryService<R, S> {
    pub fn new(records: R, objects: S) -> Self {
        Self { records, objects }
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    pub fn objects(&self) -> &S {
        &self.objects
    }

    /// Uploads one artwork keyed by the current wall-clock time.
    pub fn upload_artwork(
        &self,
        handle: &str,
        file: Option<&SelectedFile>,
    ) -> Result<Artwork, UploadError> {
        self.upload_artwork_at(handle, file, now_epoch_ms())
    }

    /// Uploads one artwork using `timestamp_ms` for the storage key.
    ///
    /// # Contract
    /// - Blank handle or missing file fail before any backend call.
    /// - Handle is stored as entered, `@`-prefixed if needed.
    /// - Object `put` happens strictly before record insert.
    pub fn upload_artwork_at(
        &self,
        handle: &str,
        file: Option<&SelectedFile>,
        timestamp_ms: u128,
    ) -> Result<Artwork, UploadError> {
        if handle.trim().is_empty() {
            return Err(UploadError::MissingHandle);
        }
        let file = file.ok_or(UploadError::MissingFile)?;

        let key = derive_storage_key(timestamp_ms, &file.name);
        info!(
            "event=upload module=service status=start key={key} size={}",
            file.bytes.len()
        );

        if let Err(source) = self.objects.put(&key, &file.bytes) {
            error!("event=upload module=service status=error stage=object_put key={key} error={source}");
            return Err(UploadError::ObjectWriteFailed { key, source });
        }

        let image_reference = self.objects.public_url(&key);
        let artwork = NewArtwork::new(handle, image_reference);
        match self.records.insert_artwork(&artwork) {
            Ok(created) => {
                info!(
                    "event=upload module=service status=ok key={key} id={}",
                    created.id
                );
                Ok(created)
            }
            Err(source) => {
                error!(
                    "event=upload module=service status=error stage=record_insert key={key} orphaned_object=true error={source}"
                );
                Err(UploadError::RecordWriteFailed { key, source })
            }
        }
    }

    /// Lists every artwork, newest first.
    pub fn list_artworks(&self) -> RepoResult<Vec<Artwork>> {
        self.records.list_artworks()
    }

    /// Deletes `target` once `confirmation` matches its handle.
    ///
    /// # Contract
    /// - Mismatched confirmation fails with `HandleMismatch` before any
    ///   backend call.
    /// - Record delete failure aborts without touching the object.
    /// - Object remove failure is reported in `DeletionReport::warning`.
    pub fn delete_artwork(
        &self,
        target: &Artwork,
        confirmation: &str,
    ) -> Result<DeletionReport, DeletionError> {
        if !confirmation_matches(target, confirmation) {
            warn!(
                "event=delete module=service status=rejected id={} reason=handle_mismatch",
                target.id
            );
            return Err(DeletionError::HandleMismatch);
        }

        info!("event=delete module=service status=start id={}", target.id);
        if let Err(source) = self.records.delete_artwork(target.id) {
            error!(
                "event=delete module=service status=error stage=record_delete id={} error={source}",
                target.id
            );
            return Err(DeletionError::RecordDeleteFailed {
                id: target.id,
                source,
            });
        }

        let storage_key = storage_key_from_reference(&target.image_reference).map(str::to_string);
        let warning = match storage_key.as_deref() {
            Some(key) => self.objects.remove(key).err().map(|source| {
                warn!(
                    "event=delete module=service status=warn stage=object_remove id={} key={key} orphaned_object=true error={source}",
                    target.id
                );
                DeletionError::ObjectDeleteFailed {
                    key: key.to_string(),
                    source,
                }
            }),
            None => {
                warn!(
                    "event=delete module=service status=warn stage=object_remove id={} reason=no_storage_key",
                    target.id
                );
                None
            }
        };

        info!("event=delete module=service status=ok id={}", target.id);
        Ok(DeletionReport {
            artwork_id: target.id,
            storage_key,
            warning,
        })
    }
}
