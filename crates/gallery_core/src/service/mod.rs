//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record-store and object-store calls into gallery use-cases.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod gallery_service;
