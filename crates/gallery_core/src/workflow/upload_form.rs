//! Upload form state: handle text, picked file, drag-and-drop capture.

use crate::model::artwork::Artwork;
use crate::repo::artwork_repo::ArtworkRepository;
use crate::service::gallery_service::{GalleryService, SelectedFile, UploadError};
use crate::storage::ObjectStore;

/// Input state behind the upload form.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    handle: String,
    file: Option<SelectedFile>,
    drag_active: bool,
    uploading: bool,
    error_message: Option<String>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn set_handle(&mut self, handle: impl Into<String>) {
        self.handle = handle.into();
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Replaces the picked file; `None` clears it.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        self.file = file;
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn drag_over(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Takes the first dropped file. An empty drop keeps the current pick.
    pub fn drop_files(&mut self, files: impl IntoIterator<Item = SelectedFile>) {
        self.drag_active = false;
        if let Some(first) = files.into_iter().next() {
            self.file = Some(first);
        }
    }

    /// Message from the last failed upload, cleared when the next one starts.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// True between `start_upload` and `finish_upload`; submit is disabled.
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Marks an upload as in flight and clears the last error.
    ///
    /// Returns `false`, changing nothing, when one is already in flight.
    pub fn start_upload(&mut self) -> bool {
        if self.uploading {
            return false;
        }
        self.uploading = true;
        self.error_message = None;
        true
    }

    /// Applies the outcome of the in-flight upload.
    ///
    /// On success the handle and file are cleared. On failure the input is
    /// kept and `error_message` is set.
    pub fn finish_upload(&mut self, result: &Result<Artwork, UploadError>) {
        self.uploading = false;
        match result {
            Ok(_) => {
                self.handle.clear();
                self.file = None;
            }
            Err(err) => self.error_message = Some(err.user_message()),
        }
    }

    /// Submits the form through `service`.
    ///
    /// Fails with `InProgress`, without calling `service`, while another
    /// upload started through `start_upload` is unfinished.
    pub fn submit<R: ArtworkRepository, S: ObjectStore>(
        &mut self,
        service: &GalleryService<R, S>,
    ) -> Result<Artwork, UploadError> {
        if !self.start_upload() {
            return Err(UploadError::InProgress);
        }
        let result = service.upload_artwork(&self.handle, self.file.as_ref());
        self.finish_upload(&result);
        result
    }
}
