//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose upload, listing and confirmed deletion to Dart via FRB.
//! - Translate core errors into stable, UI-ready messages.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Backend-touching functions are not `sync`, so FRB runs them off the UI
//!   thread and Dart awaits the result.
//! - Deletion always goes through the handle confirmation gate.

use gallery_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Artwork, ArtworkId, DeletionFlow, FileSystemObjectStore, GalleryConfig, GalleryService,
    SelectedFile, SqliteArtworkRepository, DELETED_NOTICE,
};
use log::warn;
use std::sync::OnceLock;

static GALLERY_CONFIG: OnceLock<GalleryConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One gallery card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: i64,
    pub username: String,
    pub image_url: String,
    pub profile_url: String,
}

/// Listing response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryListResponse {
    pub ok: bool,
    /// Newest first. Empty on failure; the caller keeps what it shows.
    pub items: Vec<GalleryItem>,
    pub message: String,
}

/// Mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryActionResponse {
    pub ok: bool,
    /// Affected artwork, when the operation got that far.
    pub item: Option<GalleryItem>,
    /// UI-ready message: error text on failure, notice text on success.
    pub message: String,
    /// Non-fatal warning, such as an image left behind after deletion.
    pub warning: Option<String>,
}

impl GalleryActionResponse {
    fn success(message: impl Into<String>, item: GalleryItem) -> Self {
        Self {
            ok: true,
            item: Some(item),
            message: message.into(),
            warning: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item: None,
            message: message.into(),
            warning: None,
        }
    }
}

/// Uploads one image with its owner handle.
///
/// # FFI contract
/// - Runs on the FRB worker pool.
/// - Blank handle or empty `file_name` fail without touching storage.
pub fn gallery_upload(handle: String, file_name: String, bytes: Vec<u8>) -> GalleryActionResponse {
    let file = (!file_name.trim().is_empty()).then(|| SelectedFile::new(file_name, bytes));
    let result = with_gallery_service(|service| {
        service
            .upload_artwork(&handle, file.as_ref())
            .map_err(|err| err.user_message())
    });
    match result {
        Ok(created) => GalleryActionResponse::success("Artwork uploaded.", to_gallery_item(created)),
        Err(message) => GalleryActionResponse::failure(message),
    }
}

/// Lists all artworks, newest first.
pub fn gallery_list() -> GalleryListResponse {
    let result = with_gallery_service(|service| {
        service
            .list_artworks()
            .map_err(|err| format!("gallery_list failed: {err}"))
    });
    match result {
        Ok(artworks) => {
            let items = artworks
                .into_iter()
                .map(to_gallery_item)
                .collect::<Vec<_>>();
            let message = format!("Found {} artwork(s).", items.len());
            GalleryListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(message) => {
            warn!("event=ffi_list module=ffi status=error");
            GalleryListResponse {
                ok: false,
                items: Vec::new(),
                message,
            }
        }
    }
}

/// Deletes artwork `artwork_id` after checking `confirmation` against its handle.
///
/// # FFI contract
/// - A mismatched confirmation never reaches the backend.
/// - `warning` is set when the record is gone but its image may remain.
pub fn gallery_delete(artwork_id: ArtworkId, confirmation: String) -> GalleryActionResponse {
    let result = with_gallery_service(|service| {
        let target = service
            .list_artworks()
            .map_err(|err| format!("gallery_delete failed: {err}"))?
            .into_iter()
            .find(|artwork| artwork.id == artwork_id)
            .ok_or_else(|| format!("Artwork {artwork_id} no longer exists."))?;

        let mut flow = DeletionFlow::new();
        flow.request(target.clone());
        flow.set_confirmation(confirmation);
        let report = flow.confirm(service).map_err(|err| err.user_message())?;
        Ok((target, report))
    });

    match result {
        Ok((target, report)) => {
            let mut response =
                GalleryActionResponse::success(DELETED_NOTICE, to_gallery_item(target));
            response.warning = report.warning.map(|warning| warning.user_message());
            response
        }
        Err(message) => GalleryActionResponse::failure(message),
    }
}

fn gallery_config() -> Result<&'static GalleryConfig, String> {
    if let Some(config) = GALLERY_CONFIG.get() {
        return Ok(config);
    }
    let loaded = GalleryConfig::from_env().map_err(|err| err.to_string())?;
    Ok(GALLERY_CONFIG.get_or_init(|| loaded))
}

fn with_gallery_service<T>(
    f: impl FnOnce(
        &GalleryService<SqliteArtworkRepository<'_>, FileSystemObjectStore>,
    ) -> Result<T, String>,
) -> Result<T, String> {
    let config = gallery_config()?;
    let (conn, objects) = config
        .open_backend()
        .map_err(|err| format!("gallery backend open failed: {err}"))?;
    let service = GalleryService::new(SqliteArtworkRepository::new(&conn), objects);
    f(&service)
}

fn to_gallery_item(artwork: Artwork) -> GalleryItem {
    GalleryItem {
        profile_url: artwork.profile_url(),
        id: artwork.id,
        username: artwork.owner_handle,
        image_url: artwork.image_reference,
    }
}
