// ABOUTME: Commit revision identifier with its short display form.
// ABOUTME: Validates the SHA is non-empty and alphanumeric.

use std::fmt;
use thiserror::Error;

/// Length of the abbreviated revision used in aliases and comments.
pub const SHORT_SHA_LEN: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevisionError {
    #[error("revision cannot be empty")]
    Empty,

    #[error("invalid character in revision: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub fn new(value: &str) -> Result<Self, RevisionError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(RevisionError::Empty);
        }

        if let Some(c) = value.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(RevisionError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters (or the whole revision when shorter).
    pub fn short(&self) -> &str {
        // ASCII-only, so byte slicing is safe
        &self.0[..self.0.len().min(SHORT_SHA_LEN)]
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
