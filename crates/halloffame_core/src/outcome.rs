//! Three-way outcome returned by person service operations.
//!
//! # Invariants
//! - Exactly one variant is populated per operation.
//! - Expected failures (not found, invalid input) travel as values here;
//!   storage failures never do.

use crate::validation::{FieldError, ValidationErrors};
use std::fmt::{Display, Formatter};

/// Status code carried by `ServiceOutcome::Success` for transport mapping.
pub const STATUS_OK: u16 = 200;
/// Status code carried by `ServiceOutcome::ValidationFailure`.
pub const STATUS_BAD_REQUEST: u16 = 400;
/// Status code used by `ApiError::not_found`.
pub const STATUS_NOT_FOUND: u16 = 404;

const NOT_FOUND_MESSAGE: &str = "No such person";

/// Operation-specific failure that is not a validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// The only API error currently produced: `(404, "No such person")`.
    pub fn not_found() -> Self {
        Self::new(STATUS_NOT_FOUND, NOT_FOUND_MESSAGE)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status_code, self.message)
    }
}

/// Result envelope of a person service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome<T> {
    Success(T),
    ApiError(ApiError),
    ValidationFailure(ValidationErrors),
}

impl<T> ServiceOutcome<T> {
    pub fn not_found() -> Self {
        Self::ApiError(ApiError::not_found())
    }

    /// Wraps validation engine output into a failure variant.
    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self::ValidationFailure(ValidationErrors::from(errors))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Intended transport status for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success(_) => STATUS_OK,
            Self::ApiError(err) => err.status_code,
            Self::ValidationFailure(_) => STATUS_BAD_REQUEST,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceOutcome<U> {
        match self {
            Self::Success(value) => ServiceOutcome::Success(f(value)),
            Self::ApiError(err) => ServiceOutcome::ApiError(err),
            Self::ValidationFailure(errors) => ServiceOutcome::ValidationFailure(errors),
        }
    }

    /// Returns the success value, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::ApiError(_) | Self::ValidationFailure(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, ServiceOutcome};
    use crate::validation::{FieldError, RuleKind};

    #[test]
    fn status_codes_follow_variant() {
        assert_eq!(ServiceOutcome::Success(()).status_code(), 200);
        assert_eq!(ServiceOutcome::<()>::not_found().status_code(), 404);
        let invalid = ServiceOutcome::<()>::invalid(vec![FieldError {
            field: "Name".to_string(),
            rule: RuleKind::Required,
            message: "Name must not be empty".to_string(),
        }]);
        assert_eq!(invalid.status_code(), 400);
    }

    #[test]
    fn not_found_carries_fixed_message() {
        assert_eq!(ApiError::not_found(), ApiError::new(404, "No such person"));
    }

    #[test]
    fn map_preserves_failure_variants() {
        let mapped = ServiceOutcome::<i64>::not_found().map(|id| id + 1);
        assert_eq!(mapped, ServiceOutcome::ApiError(ApiError::not_found()));
        assert_eq!(ServiceOutcome::Success(1).map(|id| id + 1).success(), Some(2));
    }
}
