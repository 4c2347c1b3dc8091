//! Maps service outcomes onto status codes and JSON bodies.
//!
//! `Success` → 200, `ApiError` → its own status code, `ValidationFailure` →
//! 400 with the field-error map as body.

use halloffame_core::ServiceOutcome;
use serde::Serialize;
use serde_json::{json, Value};

/// One response line printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

/// Converts an outcome, rendering the success value with `render`.
pub fn respond<T>(outcome: ServiceOutcome<T>, render: impl FnOnce(T) -> Value) -> TransportResponse {
    let status = outcome.status_code();
    let body = match outcome {
        ServiceOutcome::Success(value) => render(value),
        ServiceOutcome::ApiError(err) => json!({ "message": err.message }),
        ServiceOutcome::ValidationFailure(errors) => json!(errors),
    };
    TransportResponse { status, body }
}

/// Renders a serializable success value as the body.
pub fn body_of<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Acknowledgement-only success: empty body.
pub fn empty<T>(_value: T) -> Value {
    Value::Null
}
