//! Front-end state for the gallery workflows.
//!
//! # Responsibility
//! - Hold the state each workflow owns: upload form input, the displayed
//!   artwork list, the pending deletion and its confirmation buffer.
//! - Drive the service and refresh the list by explicit pull after every
//!   successful mutation.
//!
//! # Invariants
//! - Every call returns with the state machine in a stable state.
//! - Nothing here is shared between workflow instances.

pub mod deletion_flow;
pub mod gallery_view;
pub mod page;
pub mod upload_form;
