//! Person/skill domain model and its request/summary projections.
//!
//! # Responsibility
//! - Define the `Person` aggregate and the `Skill` records it owns.
//! - Define client-facing request and summary shapes with explicit
//!   field-by-field conversions.
//!
//! # Invariants
//! - A `Skill` belongs to exactly one `Person` (`person_id`), never outlives it.
//! - Skill names are unique within one person (exact, case-sensitive match).

pub mod dto;
pub mod person;
