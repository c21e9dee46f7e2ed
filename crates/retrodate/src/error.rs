// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for retrodate

use retrodate_git::GitError;
use thiserror::Error;

use crate::settings::SettingsError;

/// Errors that abort a synthesis run
///
/// Failures staging or committing a single change are not errors at this
/// level; they are recorded in the run report and the run carries on.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Working-tree status could not be interpreted
    #[error("Change discovery failed: {0}")]
    Discovery(#[source] GitError),

    /// The repository could not be queried or updated
    #[error(transparent)]
    Git(#[from] GitError),

    /// Settings are unusable
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
