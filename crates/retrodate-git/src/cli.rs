// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Backend that drives the `git` executable
//!
//! Every operation spawns `git -C <workdir> ...` and waits for it. Output is
//! captured; a non-zero exit becomes `GitError::CommandFailed`.

use crate::commit::CommitId;
use crate::error::GitError;
use crate::vcs::VersionControl;
use chrono::{DateTime, FixedOffset};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, debug_span};

/// A working tree operated on through the `git` command-line tool
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Use `workdir` as the repository root without checking it
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Find the root of the working tree containing `path`
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if `path` is not inside a
    /// non-bare repository.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let toplevel = run_git(path, &["rev-parse", "--show-toplevel"], &[])
            .map_err(|e| not_a_repository(path, e))?;
        Ok(Self::new(toplevel.trim_end_matches(['\n', '\r'])))
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        run_git(&self.workdir, args, &[])
    }
}

impl VersionControl for GitCli {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn status(&self) -> Result<String, GitError> {
        self.run(&["status", "--porcelain", "--untracked-files=all"])
    }

    fn untracked_files(&self) -> Result<Vec<String>, GitError> {
        let output = self.run(&["ls-files", "-z", "--others", "--exclude-standard"])?;
        Ok(output
            .split('\0')
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn stage(&mut self, path: &str) -> Result<(), GitError> {
        let _span = debug_span!("git_add", path).entered();
        self.run(&["add", "--", path]).map(drop)
    }

    fn stage_deletion(&mut self, path: &str) -> Result<(), GitError> {
        let _span = debug_span!("git_rm", path).entered();
        self.run(&["rm", "--cached", "--quiet", "--ignore-unmatch", "--", path])
            .map(drop)
    }

    fn commit(
        &mut self,
        message: &str,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<CommitId, GitError> {
        let date = timestamp.to_rfc3339();
        let _span = debug_span!("git_commit", %date).entered();

        run_git(
            &self.workdir,
            &["commit", "--quiet", "-m", message, "--date", &date],
            &[("GIT_COMMITTER_DATE", &date)],
        )?;
        let head = self.run(&["rev-parse", "HEAD"])?;
        Ok(CommitId::new(head))
    }

    fn set_remote(&mut self, name: &str, url: &str) -> Result<(), GitError> {
        let _span = debug_span!("git_remote", name, url).entered();
        self.run(&["remote", "set-url", name, url]).map(drop)
    }
}

/// A failed discovery means "no repository here" unless git never started
fn not_a_repository(path: &Path, error: GitError) -> GitError {
    match error {
        GitError::Spawn(e) => GitError::Spawn(e),
        _ => GitError::RepositoryNotFound {
            path: path.display().to_string(),
        },
    }
}

/// Run git in `dir` and return its stdout
fn run_git(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<String, GitError> {
    let mut cmd = Command::new("git");
    cmd.arg("-C")
        .arg(dir)
        .args(args)
        .envs(envs.iter().copied())
        .stdin(Stdio::null());

    debug!("{cmd:?}");
    let output = cmd.output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let output_text = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };
        return Err(GitError::CommandFailed {
            command: args.join(" "),
            status: output.status.to_string(),
            output: output_text,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
