//! Record-store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the `artworks` table contract used by gallery workflows.
//! - Keep SQL details out of workflow orchestration.
//!
//! # Invariants
//! - Writes validate rows before persistence.
//! - Reads reject invalid persisted state instead of masking it.

pub mod artwork_repo;
