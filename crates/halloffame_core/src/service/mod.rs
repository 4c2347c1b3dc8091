//! Use-case services.
//!
//! # Responsibility
//! - Gate every mutation behind validation.
//! - Orchestrate repository calls and wrap results in `ServiceOutcome`.

pub mod person_service;
