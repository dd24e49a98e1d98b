//! Delete confirmation state machine.
//!
//! `Idle -> ConfirmPending -> Executing -> Idle`, with `cancel` leading back
//! to `Idle` and a mismatched confirmation staying in `ConfirmPending`.

use crate::model::artwork::Artwork;
use crate::repo::artwork_repo::ArtworkRepository;
use crate::service::gallery_service::{
    confirmation_matches, DeletionError, DeletionReport, GalleryService,
};
use crate::storage::ObjectStore;
use log::warn;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeletionState {
    #[default]
    Idle,
    ConfirmPending {
        target: Artwork,
        confirmation: String,
    },
    /// Backend calls for `target` are in flight.
    Executing { target: Artwork },
}

/// Owns one pending deletion and its confirmation buffer.
#[derive(Debug, Clone, Default)]
pub struct DeletionFlow {
    state: DeletionState,
}

impl DeletionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeletionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DeletionState::Idle
    }

    /// Artwork awaiting confirmation, if any.
    pub fn target(&self) -> Option<&Artwork> {
        match &self.state {
            DeletionState::ConfirmPending { target, .. } | DeletionState::Executing { target } => {
                Some(target)
            }
            DeletionState::Idle => None,
        }
    }

    /// Starts confirmation for `target` with an empty buffer.
    ///
    /// Replaces any deletion already pending.
    pub fn request(&mut self, target: Artwork) {
        self.state = DeletionState::ConfirmPending {
            target,
            confirmation: String::new(),
        };
    }

    /// Replaces the confirmation buffer. Ignored unless confirmation is pending.
    pub fn set_confirmation(&mut self, text: impl Into<String>) {
        if let DeletionState::ConfirmPending { confirmation, .. } = &mut self.state {
            *confirmation = text.into();
        }
    }

    /// Abandons the pending deletion without side effects.
    pub fn cancel(&mut self) {
        self.state = DeletionState::Idle;
    }

    /// Runs the deletion if the buffer matches the target handle.
    ///
    /// The flow enters `Executing` only after the match. `HandleMismatch`
    /// leaves it in `ConfirmPending` without touching `service`; every other
    /// outcome, success or failure, returns it to `Idle`.
    pub fn confirm<R: ArtworkRepository, S: ObjectStore>(
        &mut self,
        service: &GalleryService<R, S>,
    ) -> Result<DeletionReport, DeletionError> {
        let (target, confirmation) = match std::mem::take(&mut self.state) {
            DeletionState::ConfirmPending {
                target,
                confirmation,
            } => (target, confirmation),
            other => {
                self.state = other;
                return Err(DeletionError::NothingPending);
            }
        };

        if !confirmation_matches(&target, &confirmation) {
            warn!(
                "event=delete_confirm module=workflow status=rejected id={} reason=handle_mismatch",
                target.id
            );
            self.state = DeletionState::ConfirmPending {
                target,
                confirmation,
            };
            return Err(DeletionError::HandleMismatch);
        }

        self.state = DeletionState::Executing {
            target: target.clone(),
        };
        let result = service.delete_artwork(&target, &confirmation);
        self.state = DeletionState::Idle;
        result
    }
}
