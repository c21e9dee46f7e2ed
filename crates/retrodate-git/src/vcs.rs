// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The narrow version-control interface the synthesizer drives

use crate::commit::CommitId;
use crate::error::GitError;
use chrono::{DateTime, FixedOffset};
use std::path::Path;

/// Operations needed to turn working-tree changes into backdated commits
///
/// Paths are relative to [`VersionControl::workdir`] and `/`-separated.
/// Every call blocks until the underlying repository has been updated, so
/// staging a path and committing it must happen back to back.
pub trait VersionControl {
    /// Root of the working tree
    fn workdir(&self) -> &Path;

    /// Working-tree status as `git status --porcelain` (v1) text
    ///
    /// # Errors
    ///
    /// Returns `GitError` if status cannot be read.
    fn status(&self) -> Result<String, GitError>;

    /// Untracked, non-ignored files
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the listing cannot be produced.
    fn untracked_files(&self) -> Result<Vec<String>, GitError>;

    /// Stage the current contents of `path`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the path cannot be added to the index.
    fn stage(&mut self, path: &str) -> Result<(), GitError>;

    /// Stage the removal of `path`, leaving any working copy alone
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the path cannot be removed from the index.
    fn stage_deletion(&mut self, path: &str) -> Result<(), GitError>;

    /// Commit the index with `message`, authored and committed at `timestamp`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the commit is rejected.
    fn commit(
        &mut self,
        message: &str,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<CommitId, GitError>;

    /// Point remote `name` at `url`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the remote does not exist or cannot be updated.
    fn set_remote(&mut self, name: &str, url: &str) -> Result<(), GitError>;
}
