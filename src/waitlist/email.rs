use once_cell::sync::Lazy;
use regex::Regex;

use crate::foundation::error::{RetrospectError, RetrospectResult};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// A syntactically valid email address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate `raw` after trimming surrounding whitespace.
    pub fn parse(raw: &str) -> RetrospectResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RetrospectError::validation("Email has not been provided."));
        }
        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(RetrospectError::validation("Please provide a valid email."));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The address as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EmailAddress {
    type Err = RetrospectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
