// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The history synthesizer
//!
//! A run is one linear pass: discover the changes, shuffle them, schedule them
//! over the window, then stage and commit each one in turn. A change whose
//! staging or commit is rejected is reported and the pass moves on; nothing is
//! retried or rolled back, so a rejected change stays wherever git left it.

use chrono::{DateTime, FixedOffset};
use retrodate_git::{ChangeEntry, CommitId, GitError, VersionControl};
use tracing::{error, info};

use crate::discovery;
use crate::entropy::Entropy;
use crate::error::SynthError;
use crate::report::{CommittedEntry, FailedEntry, NO_CHANGES, RunReport};
use crate::schedule::{self, CommitPlan, Schedule, Staging};
use crate::settings::Settings;

/// Drives discovery, scheduling and committing against one repository
pub struct Synthesizer<'a, E: Entropy> {
    vcs: &'a mut dyn VersionControl,
    settings: &'a Settings,
    entropy: E,
}

impl<'a, E: Entropy> Synthesizer<'a, E> {
    /// Create a synthesizer over `vcs` drawing randomness from `entropy`
    pub fn new(vcs: &'a mut dyn VersionControl, settings: &'a Settings, entropy: E) -> Self {
        Self {
            vcs,
            settings,
            entropy,
        }
    }

    /// Changed, deleted and untracked paths of the working tree
    ///
    /// # Errors
    ///
    /// Returns `SynthError` if status cannot be read or parsed.
    pub fn discover_changes(&self) -> Result<Vec<ChangeEntry>, SynthError> {
        discovery::discover_changes(&*self.vcs, self.settings)
    }

    /// A random working-hours timestamp on day `day_offset` of the window
    pub fn next_commit_time(&mut self, day_offset: u32) -> DateTime<FixedOffset> {
        schedule::next_commit_time(self.settings, day_offset, &mut self.entropy)
    }

    /// A templated conventional-commit message for `file_path`
    pub fn compose_message(&mut self, file_path: &str) -> String {
        schedule::compose_message(&self.settings.templates, file_path, &mut self.entropy)
    }

    /// Point the configured remote at the configured URL
    ///
    /// # Errors
    ///
    /// Returns `SynthError::Git` if the remote cannot be updated.
    pub fn rewrite_remote(&mut self) -> Result<(), SynthError> {
        let remote = &self.settings.remote;
        self.vcs.set_remote(&remote.name, &remote.url)?;
        info!("Updated remote URL of {} to {}", remote.name, remote.url);
        Ok(())
    }

    /// Discover, shuffle and schedule without touching the repository
    ///
    /// # Errors
    ///
    /// Returns `SynthError` if discovery fails.
    pub fn plan(&mut self, commits_per_day: usize) -> Result<Schedule, SynthError> {
        let mut changes = self.discover_changes()?;
        if changes.is_empty() {
            info!("{NO_CHANGES}");
            return Ok(Schedule::default());
        }

        self.entropy.shuffle(&mut changes);
        Ok(schedule::schedule(
            changes,
            self.settings,
            commits_per_day,
            self.vcs.workdir(),
            &mut self.entropy,
        ))
    }

    /// Spread every discovered change over the window as backdated commits
    ///
    /// # Errors
    ///
    /// Returns `SynthError` only if discovery fails; per-change failures are
    /// recorded in the report.
    pub fn run(&mut self, commits_per_day: usize) -> Result<RunReport, SynthError> {
        let schedule = self.plan(commits_per_day)?;
        Ok(self.execute(schedule))
    }

    /// Stage and commit each planned change in order
    pub fn execute(&mut self, schedule: Schedule) -> RunReport {
        let mut report = RunReport {
            discovered: schedule.discovered,
            skipped: schedule.skipped.into_iter().map(|e| e.path).collect(),
            unscheduled: schedule.unscheduled.into_iter().map(|e| e.path).collect(),
            ..Default::default()
        };

        for plan in schedule.commits {
            match self.commit_plan(&plan) {
                Ok(commit) => {
                    info!(
                        "Committed {} with message: {} on {}",
                        plan.entry.path,
                        plan.message,
                        plan.timestamp.to_rfc3339()
                    );
                    report.committed.push(CommittedEntry {
                        path: plan.entry.path,
                        status: plan.entry.status,
                        day_offset: plan.day_offset,
                        timestamp: plan.timestamp,
                        message: plan.message,
                        commit,
                    });
                }
                Err(e) => {
                    error!("Failed to commit {}: {e}", plan.entry.path);
                    report.failed.push(FailedEntry {
                        path: plan.entry.path,
                        day_offset: plan.day_offset,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    fn commit_plan(&mut self, plan: &CommitPlan) -> Result<CommitId, GitError> {
        match plan.staging {
            Staging::Add => self.vcs.stage(&plan.entry.path)?,
            Staging::Delete => self.vcs.stage_deletion(&plan.entry.path)?,
        }
        self.vcs.commit(&plan.message, plan.timestamp)
    }
}
