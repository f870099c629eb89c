// ABOUTME: Repository identity in `owner/name` form.
// ABOUTME: Parsed once from GITHUB_REPOSITORY and shared read-only afterwards.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoSlugError {
    #[error("repository cannot be empty")]
    Empty,

    #[error("repository must be in owner/name form: {0}")]
    InvalidFormat(String),

    #[error("invalid character in repository: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    pub fn parse(input: &str) -> Result<Self, RepoSlugError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RepoSlugError::Empty);
        }

        let (owner, name) = input
            .split_once('/')
            .ok_or_else(|| RepoSlugError::InvalidFormat(input.to_string()))?;

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(RepoSlugError::InvalidFormat(input.to_string()));
        }

        // GitHub owners and repositories: alphanumeric, hyphen, underscore, dot
        for c in owner.chars().chain(name.chars()) {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(RepoSlugError::InvalidChar(c));
            }
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full `owner/name` form, as GitHub reports it in `full_name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// GitHub compares full names case-insensitively.
    pub fn matches(&self, full_name: &str) -> bool {
        self.full_name().eq_ignore_ascii_case(full_name)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
