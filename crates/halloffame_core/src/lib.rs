//! Core domain logic for the Hall of Fame person registry.
//! This crate owns validation, skill reconciliation and persistence rules.

pub mod cancel;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod outcome;
pub mod reconcile;
pub mod repo;
pub mod service;
pub mod validation;

pub use cancel::CancelToken;
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::dto::{
    CreateRequest, PersonRequest, PersonSummary, SkillRequest, SkillSummary, UpdateRequest,
};
pub use model::person::{NewPerson, NewSkill, Person, PersonId, Skill, SkillId};
pub use outcome::{ApiError, ServiceOutcome};
pub use reconcile::{reconcile, SkillPlan, SkillUpdate};
pub use repo::person_repo::{PersonRepository, RepoError, RepoResult, SqlitePersonRepository};
pub use service::person_service::{PersonService, ServiceError, ServiceResult};
pub use validation::{validate_person_request, FieldError, RuleKind, ValidationErrors};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
