// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Backend that drives libgit2 through the `git2` crate
//!
//! Status is rendered back into porcelain v1 lines so both backends share the
//! same parser.

use crate::change::quote_path;
use crate::commit::CommitId;
use crate::error::GitError;
use crate::vcs::VersionControl;
use chrono::{DateTime, FixedOffset};
use git2::{ErrorCode, Repository, Signature, Status, StatusOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A git repository wrapper for staging and committing through libgit2
pub struct GitRepo {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository,
    /// or `GitError::BareRepository` if it has no working tree.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Self::with_workdir(repo)
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found,
    /// or `GitError::BareRepository` if it has no working tree.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Self::with_workdir(repo)
    }

    fn with_workdir(repo: Repository) -> Result<Self, GitError> {
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| GitError::BareRepository {
                path: repo.path().display().to_string(),
            })?;
        Ok(Self { repo, workdir })
    }

    /// Get the HEAD commit id, or `None` on an unborn branch
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD exists but cannot be resolved.
    pub fn head_id(&self) -> Result<Option<CommitId>, GitError> {
        Ok(self.head_commit()?.map(|commit| commit.id().into()))
    }

    fn head_commit(&self) -> Result<Option<git2::Commit<'_>>, GitError> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Status entries as (porcelain code, path) pairs
    fn status_entries(&self) -> Result<Vec<(&'static str, String)>, GitError> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut entries = Vec::with_capacity(statuses.len());
        for entry in statuses.iter() {
            let Some(code) = porcelain_code(entry.status()) else {
                continue;
            };
            match entry.path() {
                Some(path) => entries.push((code, path.to_string())),
                None => warn!("Ignoring status entry with a non UTF-8 path"),
            }
        }
        Ok(entries)
    }
}

impl VersionControl for GitRepo {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn status(&self) -> Result<String, GitError> {
        let mut output = String::new();
        for (code, path) in self.status_entries()? {
            output.push_str(code);
            output.push(' ');
            output.push_str(&quote_path(&path));
            output.push('\n');
        }
        Ok(output)
    }

    fn untracked_files(&self) -> Result<Vec<String>, GitError> {
        Ok(self
            .status_entries()?
            .into_iter()
            .filter(|(code, _)| *code == "??")
            .map(|(_, path)| path)
            .collect())
    }

    fn stage(&mut self, path: &str) -> Result<(), GitError> {
        debug!(path, "Adding to index");
        let mut index = self.repo.index()?;
        let relative = Path::new(path);
        // git add refuses ignored paths unless they are already tracked
        if index.get_path(relative, 0).is_none() && self.repo.status_should_ignore(relative)? {
            return Err(GitError::IgnoredPath {
                path: path.to_string(),
            });
        }
        index.add_path(relative)?;
        index.write()?;
        Ok(())
    }

    fn stage_deletion(&mut self, path: &str) -> Result<(), GitError> {
        debug!(path, "Removing from index");
        let mut index = self.repo.index()?;
        index.remove_path(Path::new(path))?;
        index.write()?;
        Ok(())
    }

    fn commit(
        &mut self,
        message: &str,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<CommitId, GitError> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parent = self.head_commit()?;

        let unchanged = match &parent {
            Some(parent) => parent.tree_id() == tree_id,
            None => tree.len() == 0,
        };
        if unchanged {
            return Err(GitError::NothingToCommit);
        }

        let configured = self.repo.signature()?;
        let time = git2::Time::new(
            timestamp.timestamp(),
            timestamp.offset().local_minus_utc() / 60,
        );
        let signature = Signature::new(
            configured.name().unwrap_or("retrodate"),
            configured.email().unwrap_or(""),
            &time,
        )?;

        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        debug!(%oid, date = %timestamp.to_rfc3339(), "Created commit");
        Ok(oid.into())
    }

    fn set_remote(&mut self, name: &str, url: &str) -> Result<(), GitError> {
        self.repo.find_remote(name)?;
        self.repo.remote_set_url(name, url)?;
        Ok(())
    }
}

/// Two-character porcelain code for a libgit2 status, `None` if unchanged
fn porcelain_code(status: Status) -> Option<&'static str> {
    if status.is_ignored() {
        return None;
    }
    if status.is_conflicted() {
        return Some("UU");
    }
    if status.is_wt_new() {
        return Some("??");
    }

    let index = if status.is_index_new() {
        'A'
    } else if status.is_index_modified() {
        'M'
    } else if status.is_index_deleted() {
        'D'
    } else if status.is_index_renamed() {
        'R'
    } else if status.is_index_typechange() {
        'T'
    } else {
        ' '
    };
    let worktree = if status.is_wt_modified() {
        'M'
    } else if status.is_wt_deleted() {
        'D'
    } else if status.is_wt_renamed() {
        'R'
    } else if status.is_wt_typechange() {
        'T'
    } else {
        ' '
    };

    Some(match (index, worktree) {
        (' ', ' ') => return None,
        ('A', ' ') => "A ",
        ('A', 'M') => "AM",
        ('A', 'D') => "AD",
        ('M', ' ') => "M ",
        ('M', 'M') => "MM",
        ('M', 'D') => "MD",
        ('D', _) => "D ",
        ('R', ' ') => "R ",
        ('R', 'M') => "RM",
        ('T', ' ') => "T ",
        (' ', 'M') => " M",
        (' ', 'D') => " D",
        (' ', 'R') => " R",
        (' ', 'T') => " T",
        _ => "MM",
    })
}
