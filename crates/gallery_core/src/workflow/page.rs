//! Gallery page: upload form above the gallery view.

use super::gallery_view::GalleryView;
use super::upload_form::UploadForm;
use crate::model::artwork::Artwork;
use crate::repo::artwork_repo::ArtworkRepository;
use crate::service::gallery_service::{GalleryService, UploadError};
use crate::storage::ObjectStore;

/// Composes the upload and gallery workflows.
#[derive(Debug, Clone, Default)]
pub struct GalleryPage {
    pub upload: UploadForm,
    pub gallery: GalleryView,
}

impl GalleryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial load of the gallery list.
    pub fn activate<R: ArtworkRepository, S: ObjectStore>(
        &mut self,
        service: &GalleryService<R, S>,
    ) -> bool {
        self.gallery.refresh(service)
    }

    /// Submits the upload form and refreshes the gallery on success.
    pub fn submit_upload<R: ArtworkRepository, S: ObjectStore>(
        &mut self,
        service: &GalleryService<R, S>,
    ) -> Result<Artwork, UploadError> {
        let created = self.upload.submit(service)?;
        self.gallery.refresh(service);
        Ok(created)
    }
}
