use crate::foundation::error::{RetrospectError, RetrospectResult};
use crate::waitlist::endpoint::{SubmissionRequest, SubmissionResponse, add_email};
use crate::waitlist::store::EmailStore;

/// Notice shown after a submission succeeded.
pub const JOINED_MESSAGE: &str = "You're on the Retrospect waitlist!";

/// Delivers submissions to the endpoint.
pub trait SubmissionTransport {
    /// Send `request`; failures to deliver or to read a reply are [`RetrospectError::Transport`].
    fn send(&mut self, request: &SubmissionRequest) -> RetrospectResult<SubmissionResponse>;
}

/// Transport that calls [`add_email`] directly against a store.
#[derive(Debug)]
pub struct InProcessTransport<S: EmailStore> {
    store: S,
}

impl<S: EmailStore> InProcessTransport<S> {
    /// Wrap `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: EmailStore> SubmissionTransport for InProcessTransport<S> {
    fn send(&mut self, request: &SubmissionRequest) -> RetrospectResult<SubmissionResponse> {
        Ok(add_email(&mut self.store, request))
    }
}

/// Transient user-facing notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The address was registered.
    Success(String),
    /// The submission failed; nothing is retried.
    Error(String),
}

impl Notice {
    /// Notification text.
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) => m,
        }
    }
}

/// The waitlist input and its submit action.
#[derive(Clone, Debug, Default)]
pub struct WaitlistForm {
    input: String,
}

impl WaitlistForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input text.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Submit the current input once and map the outcome to a notice.
    ///
    /// The input is cleared only on success.
    pub fn submit<T: SubmissionTransport + ?Sized>(&mut self, transport: &mut T) -> Notice {
        let request = SubmissionRequest::post_email(&self.input);
        match transport.send(&request) {
            Ok(resp) if resp.is_success() => {
                self.input.clear();
                Notice::Success(JOINED_MESSAGE.to_string())
            }
            Ok(resp) => Notice::Error(
                resp.message()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("request failed with status {}", resp.status)),
            ),
            Err(e @ RetrospectError::Transport(_)) => {
                tracing::warn!(error = %e, "waitlist submission could not be delivered");
                Notice::Error(e.to_string())
            }
            Err(e) => Notice::Error(RetrospectError::transport(e.to_string()).to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/waitlist/form.rs"]
mod tests;
