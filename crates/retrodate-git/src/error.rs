// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for retrodate-git

use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// The `git` executable could not be started
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// The `git` executable exited unsuccessfully
    #[error("git {command} failed ({status}): {output}")]
    CommandFailed {
        /// Arguments passed to git, space separated
        command: String,
        /// Exit status as reported by the OS
        status: String,
        /// Trimmed stderr, or stdout when git wrote nothing to stderr
        output: String,
    },

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Repository has no working tree to stage files from
    #[error("Repository has no working directory: {path}")]
    BareRepository {
        /// Path of the bare repository
        path: String,
    },

    /// A line of porcelain status output could not be parsed
    #[error("Malformed status line {line:?}: {reason}")]
    MalformedStatus {
        /// The offending line
        line: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// An untracked path matches an ignore rule and cannot be added
    #[error("Path is ignored by one of the .gitignore files: {path}")]
    IgnoredPath {
        /// The rejected path
        path: String,
    },

    /// The index matches HEAD, so a commit would be empty
    #[error("Nothing to commit")]
    NothingToCommit,
}
