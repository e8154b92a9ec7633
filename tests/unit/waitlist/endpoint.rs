use super::*;
use crate::waitlist::store::{DUPLICATE_MESSAGE, MemoryStore};

#[test]
fn first_submission_is_created() {
    let mut store = MemoryStore::new();
    let resp = add_email(&mut store, &SubmissionRequest::post_email("user@example.com"));
    assert_eq!(resp.status, STATUS_CREATED);
    assert!(resp.is_success());
    let record = resp.record().unwrap();
    assert_eq!(record.email, "user@example.com");
    assert_eq!(store.len(), 1);
}

#[test]
fn duplicate_submission_is_rejected_and_not_stored() {
    let mut store = MemoryStore::new();
    add_email(&mut store, &SubmissionRequest::post_email("user@example.com"));
    let resp = add_email(&mut store, &SubmissionRequest::post_email("user@example.com"));
    assert_eq!(resp.status, STATUS_BAD_REQUEST);
    assert_eq!(resp.message(), Some(DUPLICATE_MESSAGE));
    assert_eq!(store.len(), 1);
}

#[test]
fn invalid_address_is_rejected_and_not_stored() {
    let mut store = MemoryStore::new();
    let resp = add_email(&mut store, &SubmissionRequest::post_email("not-an-email"));
    assert_eq!(resp.status, STATUS_BAD_REQUEST);
    assert_eq!(resp.message(), Some("Please provide a valid email."));
    assert!(store.is_empty());
}

#[test]
fn missing_or_non_string_email_is_reported() {
    let mut store = MemoryStore::new();
    for body in [Value::Null, json!({}), json!({ "email": 42 }), json!({ "email": "" })] {
        let resp = add_email(&mut store, &SubmissionRequest::post(body));
        assert_eq!(resp.status, STATUS_BAD_REQUEST);
        assert_eq!(resp.message(), Some("Email has not been provided."));
    }
    assert!(store.is_empty());
}

#[test]
fn non_post_methods_are_rejected() {
    let mut store = MemoryStore::new();
    let req = SubmissionRequest {
        method: "GET".to_string(),
        body: json!({ "email": "user@example.com" }),
    };
    let resp = add_email(&mut store, &req);
    assert_eq!(resp.status, STATUS_BAD_REQUEST);
    assert_eq!(resp.message(), Some("GET is an invalid request method."));
    assert!(store.is_empty());
}

struct FailingStore;

impl EmailStore for FailingStore {
    fn register(&mut self, _email: &EmailAddress) -> RetrospectResult<EmailRecord> {
        Err(RetrospectError::Other(anyhow::anyhow!("disk full")))
    }

    fn contains(&self, _email: &EmailAddress) -> bool {
        false
    }

    fn records(&self) -> &[EmailRecord] {
        &[]
    }
}

#[test]
fn store_failures_map_to_internal_error() {
    let resp = add_email(&mut FailingStore, &SubmissionRequest::post_email("a@example.com"));
    assert_eq!(resp.status, STATUS_INTERNAL_ERROR);
    assert!(resp.message().unwrap().contains("disk full"));
}
