//! Displayed artwork list, pending deletion and transient notice.

use super::deletion_flow::DeletionFlow;
use crate::model::artwork::{Artwork, ArtworkId};
use crate::repo::artwork_repo::ArtworkRepository;
use crate::service::gallery_service::{DeletionError, DeletionReport, GalleryService};
use crate::storage::ObjectStore;
use log::{debug, error};
use std::time::{Duration, Instant};

/// How long a success notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Message shown after a successful deletion.
pub const DELETED_NOTICE: &str = "Artwork deleted successfully";

/// Self-dismissing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub shown_at: Instant,
}

impl Notice {
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < NOTICE_TTL
    }
}

/// Gallery listing state owned by the component that renders it.
#[derive(Debug, Clone, Default)]
pub struct GalleryView {
    artworks: Vec<Artwork>,
    deletion: DeletionFlow,
    notice: Option<Notice>,
    error_message: Option<String>,
}

impl GalleryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Artworks as last fetched, newest first.
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn deletion(&self) -> &DeletionFlow {
        &self.deletion
    }

    /// Blocking message from the last failed confirmation.
    ///
    /// Cleared when a deletion is requested, cancelled or confirmed again.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Re-fetches the list. On failure the current list is kept.
    ///
    /// Returns whether the list was replaced.
    pub fn refresh<R: ArtworkRepository, S: ObjectStore>(
        &mut self,
        service: &GalleryService<R, S>,
    ) -> bool {
        match service.list_artworks() {
            Ok(artworks) => {
                debug!(
                    "event=gallery_refresh module=workflow status=ok count={}",
                    artworks.len()
                );
                self.artworks = artworks;
                true
            }
            Err(err) => {
                error!(
                    "event=gallery_refresh module=workflow status=error kept={} error={err}",
                    self.artworks.len()
                );
                false
            }
        }
    }

    /// Starts delete confirmation for a displayed artwork.
    ///
    /// Returns `false` when `id` is not in the current list.
    pub fn request_delete(&mut self, id: ArtworkId) -> bool {
        match self.artworks.iter().find(|artwork| artwork.id == id) {
            Some(target) => {
                self.deletion.request(target.clone());
                self.error_message = None;
                true
            }
            None => false,
        }
    }

    pub fn set_confirmation(&mut self, text: impl Into<String>) {
        self.deletion.set_confirmation(text);
    }

    pub fn cancel_delete(&mut self) {
        self.deletion.cancel();
        self.error_message = None;
    }

    /// Confirms the pending deletion.
    ///
    /// After the record is deleted the list is refreshed and the success
    /// notice is shown, even when the object remove only produced a warning.
    /// Any error is also kept in `error_message` for the blocking notice.
    pub fn confirm_delete<R: ArtworkRepository, S: ObjectStore>(
        &mut self,
        service: &GalleryService<R, S>,
        now: Instant,
    ) -> Result<DeletionReport, DeletionError> {
        self.error_message = None;
        let report = match self.deletion.confirm(service) {
            Ok(report) => report,
            Err(err) => {
                self.error_message = Some(err.user_message());
                return Err(err);
            }
        };
        self.refresh(service);
        self.notice = Some(Notice {
            message: DELETED_NOTICE.to_string(),
            shown_at: now,
        });
        Ok(report)
    }

    /// Visible notice text at `now`; expired notices are dropped.
    pub fn notice(&mut self, now: Instant) -> Option<&str> {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| !notice.is_visible(now))
        {
            self.notice = None;
        }
        self.notice.as_ref().map(|notice| notice.message.as_str())
    }
}
