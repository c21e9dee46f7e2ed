//! Commit identifiers returned by the backends

use serde::{Deserialize, Serialize};
use std::fmt;

/// Object id of a commit created by a backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Wrap a SHA as printed by git, trimming surrounding whitespace
    #[must_use]
    pub fn new(sha: impl AsRef<str>) -> Self {
        Self(sha.as_ref().trim().to_string())
    }

    /// Validate that a SHA is a valid 40-character hex string
    #[must_use]
    pub fn is_valid_sha(sha: &str) -> bool {
        sha.len() == 40 && sha.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Whether this id is a full 40-character SHA
    #[must_use]
    pub fn is_valid(&self) -> bool {
        Self::is_valid_sha(&self.0)
    }

    /// The full SHA
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.0[..7.min(self.0.len())]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<git2::Oid> for CommitId {
    fn from(oid: git2::Oid) -> Self {
        Self(oid.to_string())
    }
}
