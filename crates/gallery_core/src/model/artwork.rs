//! Artwork domain model.
//!
//! # Responsibility
//! - Define the metadata record that points at one stored image object.
//! - Provide handle normalization and profile link helpers.
//!
//! # Invariants
//! - `id` is assigned by the record store and never reused.
//! - `owner_handle` is non-empty and starts with `@`.
//! - `image_reference` is a non-empty public locator of the stored object.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record-store identifier. Strictly increasing in creation order.
pub type ArtworkId = i64;

/// Prefix every stored handle carries.
pub const HANDLE_PREFIX: char = '@';

const PROFILE_BASE_URL: &str = "https://x.com/";

/// Persisted artwork metadata row.
///
/// Field names are serialized with the column names of the `artworks` table
/// so the record can be handed to front ends without remapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    /// Uploader handle, always `@`-prefixed.
    #[serde(rename = "username")]
    pub owner_handle: String,
    /// Public URL of the stored image object.
    #[serde(rename = "image_url")]
    pub image_reference: String,
}

/// Insert payload for one artwork row; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtwork {
    pub owner_handle: String,
    pub image_reference: String,
}

/// Validation errors for artwork rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkValidationError {
    EmptyHandle,
    MissingHandlePrefix(String),
    EmptyImageReference,
}

impl Display for ArtworkValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHandle => write!(f, "owner_handle must not be empty"),
            Self::MissingHandlePrefix(value) => {
                write!(f, "owner_handle must start with `@`, got `{value}`")
            }
            Self::EmptyImageReference => write!(f, "image_reference must not be empty"),
        }
    }
}

impl Error for ArtworkValidationError {}

impl Artwork {
    /// Checks the persisted-row invariants.
    pub fn validate(&self) -> Result<(), ArtworkValidationError> {
        validate_fields(&self.owner_handle, &self.image_reference)
    }

    /// Link to the uploader's profile page.
    ///
    /// Only the first `@` is dropped, so `@@bob` links to `@bob`.
    pub fn profile_url(&self) -> String {
        format!(
            "{PROFILE_BASE_URL}{}",
            self.owner_handle.replacen(HANDLE_PREFIX, "", 1)
        )
    }
}

impl NewArtwork {
    /// Builds an insert payload, normalizing the handle.
    pub fn new(owner_handle: &str, image_reference: impl Into<String>) -> Self {
        Self {
            owner_handle: normalize_handle(owner_handle),
            image_reference: image_reference.into(),
        }
    }

    /// Checks the same invariants as [`Artwork::validate`] before insert.
    pub fn validate(&self) -> Result<(), ArtworkValidationError> {
        validate_fields(&self.owner_handle, &self.image_reference)
    }

    /// Attaches the store-assigned id.
    pub fn into_artwork(self, id: ArtworkId) -> Artwork {
        Artwork {
            id,
            owner_handle: self.owner_handle,
            image_reference: self.image_reference,
        }
    }
}

/// Prepends `@` unless the handle already starts with one.
///
/// Handles that already carry the prefix are returned unchanged.
pub fn normalize_handle(handle: &str) -> String {
    if handle.starts_with(HANDLE_PREFIX) {
        handle.to_string()
    } else {
        format!("{HANDLE_PREFIX}{handle}")
    }
}

fn validate_fields(owner_handle: &str, image_reference: &str) -> Result<(), ArtworkValidationError> {
    if owner_handle.trim().is_empty() {
        return Err(ArtworkValidationError::EmptyHandle);
    }
    if !owner_handle.starts_with(HANDLE_PREFIX) {
        return Err(ArtworkValidationError::MissingHandlePrefix(
            owner_handle.to_string(),
        ));
    }
    if image_reference.trim().is_empty() {
        return Err(ArtworkValidationError::EmptyImageReference);
    }
    Ok(())
}
