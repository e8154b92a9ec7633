use serde_json::{Value, json};

use crate::foundation::error::{RetrospectError, RetrospectResult};
use crate::waitlist::email::EmailAddress;
use crate::waitlist::store::{EmailRecord, EmailStore};

/// `201 Created`.
pub const STATUS_CREATED: u16 = 201;
/// `400 Bad Request`.
pub const STATUS_BAD_REQUEST: u16 = 400;
/// `500 Internal Server Error`.
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Inbound request for the add-email operation.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionRequest {
    /// HTTP method name as received, e.g. `"POST"`.
    pub method: String,
    /// Parsed JSON body; `Value::Null` when absent.
    pub body: Value,
}

impl SubmissionRequest {
    /// A `POST` with an arbitrary JSON body.
    pub fn post(body: Value) -> Self {
        Self {
            method: "POST".to_string(),
            body,
        }
    }

    /// A `POST` carrying `{ "email": email }`.
    pub fn post_email(email: &str) -> Self {
        Self::post(json!({ "email": email }))
    }
}

/// Status code plus JSON body.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubmissionResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body: `{ "newEmail": .. }` on success, `{ "message": .. }` otherwise.
    pub body: Value,
}

impl SubmissionResponse {
    fn created(record: &EmailRecord) -> Self {
        Self {
            status: STATUS_CREATED,
            body: json!({ "newEmail": record }),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
        }
    }

    /// Return `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `message` field of an error body.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// The stored record of a success body.
    pub fn record(&self) -> Option<EmailRecord> {
        self.body
            .get("newEmail")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Handle one add-email submission against `store`.
///
/// Validation and duplicate failures answer `400` with a human-readable message; store IO
/// failures answer `500`.
#[tracing::instrument(skip_all, fields(method = %request.method))]
pub fn add_email<S: EmailStore + ?Sized>(
    store: &mut S,
    request: &SubmissionRequest,
) -> SubmissionResponse {
    match register_from_request(store, request) {
        Ok(record) => {
            tracing::info!(id = record.id, "waitlist registration accepted");
            SubmissionResponse::created(&record)
        }
        Err(RetrospectError::Validation(msg) | RetrospectError::Duplicate(msg)) => {
            tracing::info!(reason = %msg, "waitlist registration rejected");
            SubmissionResponse::error(STATUS_BAD_REQUEST, msg)
        }
        Err(e) => {
            tracing::warn!(error = %e, "waitlist registration failed");
            SubmissionResponse::error(STATUS_INTERNAL_ERROR, e.to_string())
        }
    }
}

fn register_from_request<S: EmailStore + ?Sized>(
    store: &mut S,
    request: &SubmissionRequest,
) -> RetrospectResult<EmailRecord> {
    if !request.method.eq_ignore_ascii_case("POST") {
        return Err(RetrospectError::validation(format!(
            "{} is an invalid request method.",
            request.method
        )));
    }
    let raw = request
        .body
        .get("email")
        .and_then(Value::as_str)
        .ok_or_else(|| RetrospectError::validation("Email has not been provided."))?;
    let email = EmailAddress::parse(raw)?;
    store.register(&email)
}

#[cfg(test)]
#[path = "../../tests/unit/waitlist/endpoint.rs"]
mod tests;
