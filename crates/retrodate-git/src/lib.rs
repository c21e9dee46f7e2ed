// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! retrodate-git: working-tree inspection and commit plumbing for retrodate
//!
//! This library crate discovers what changed in a working tree and stages and
//! commits individual paths with explicit timestamps. Two backends implement
//! the [`VersionControl`] interface: [`GitCli`] drives the `git` executable and
//! [`GitRepo`] drives libgit2.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use retrodate_git::{GitCli, VersionControl, parse_status};
//!
//! let git = GitCli::discover(".").expect("discover repo");
//! let changes = parse_status(&git.status().expect("status")).expect("parse");
//!
//! for change in changes {
//!     println!("{} {}", change.status.code(), change.path);
//! }
//! ```

pub mod change;
pub mod cli;
pub mod commit;
pub mod error;
pub mod repo;
pub mod vcs;

pub use change::{ChangeEntry, ChangeStatus, base_name, parse_status, parse_status_line};
pub use cli::GitCli;
pub use commit::CommitId;
pub use error::GitError;
pub use repo::GitRepo;
pub use vcs::VersionControl;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::change::{ChangeEntry, ChangeStatus};
    pub use crate::commit::CommitId;
    pub use crate::error::GitError;
    pub use crate::vcs::VersionControl;
}
