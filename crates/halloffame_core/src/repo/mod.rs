//! Storage contracts and SQLite implementation for the person aggregate.
//!
//! # Responsibility
//! - Define the storage collaborator contract consumed by the person service.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - Every mutating call commits as one transaction or not at all.
//! - Removing a person removes its skills.

pub mod person_repo;
