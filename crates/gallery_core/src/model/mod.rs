//! Gallery domain model.
//!
//! # Responsibility
//! - Define the canonical artwork record rendered by gallery views.
//! - Own handle normalization shared by upload and display paths.
//!
//! # Invariants
//! - Every artwork is identified by a store-assigned, increasing `ArtworkId`.
//! - Deletion is a hard delete of record and backing object, not a tombstone.

pub mod artwork;
