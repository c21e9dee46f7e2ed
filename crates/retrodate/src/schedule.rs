// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit scheduling
//!
//! Assigns each discovered change to a day of the window, a time of day and a
//! message. Scheduling touches the filesystem only to decide how a path will
//! be staged; nothing is written.

use std::path::Path;

use chrono::{DateTime, Days, FixedOffset, NaiveTime, TimeDelta};
use retrodate_git::{ChangeEntry, ChangeStatus, base_name};
use serde::Serialize;
use tracing::{debug, warn};

use crate::entropy::Entropy;
use crate::settings::Settings;
use crate::template::{CommitKind, CommitMessageTemplate};

/// How a scheduled path gets into the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Staging {
    /// Stage the file's current contents
    Add,
    /// Stage the removal of a file that is already gone
    Delete,
}

impl Staging {
    /// Decide how to stage `entry`, or `None` if it cannot be staged
    ///
    /// Deleted entries whose file is absent are staged as removals; any entry
    /// whose file exists is added. A non-deleted entry with no file on disk
    /// has nothing to stage.
    #[must_use]
    pub fn for_entry(entry: &ChangeEntry, workdir: &Path) -> Option<Self> {
        let exists = workdir.join(&entry.path).exists();
        match (entry.status, exists) {
            (ChangeStatus::Deleted, false) => Some(Self::Delete),
            (_, true) => Some(Self::Add),
            (_, false) => None,
        }
    }
}

/// One commit to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitPlan {
    /// Day of the window, 0 being the first
    pub day_offset: u32,
    /// Author and committer timestamp
    pub timestamp: DateTime<FixedOffset>,
    /// Commit message
    pub message: String,
    /// How the path is staged
    pub staging: Staging,
    /// The change being committed
    pub entry: ChangeEntry,
}

/// The full assignment of changes to commits for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// Number of changes discovered, scheduled or not
    pub discovered: usize,
    /// Commits in the order they will be created
    pub commits: Vec<CommitPlan>,
    /// Changes with nothing to stage
    pub skipped: Vec<ChangeEntry>,
    /// Changes left over once every day was full
    pub unscheduled: Vec<ChangeEntry>,
}

impl Schedule {
    /// Number of commits planned for `day_offset`
    #[must_use]
    pub fn commits_on(&self, day_offset: u32) -> usize {
        self.commits
            .iter()
            .filter(|plan| plan.day_offset == day_offset)
            .count()
    }

    /// Whether the schedule creates no commits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Whether discovery found nothing to commit at all
    #[must_use]
    pub fn found_no_changes(&self) -> bool {
        self.discovered == 0
    }
}

/// A timestamp on day `day_offset` of the window at a random working hour
///
/// Hour and minute are drawn uniformly from the configured hour range and
/// `0..=59`; seconds are zero. The timestamp carries the configured offset.
pub fn next_commit_time(
    settings: &Settings,
    day_offset: u32,
    entropy: &mut impl Entropy,
) -> DateTime<FixedOffset> {
    let date = settings
        .window_start
        .checked_add_days(Days::new(u64::from(day_offset)))
        .unwrap_or(settings.window_end);
    let (first_hour, last_hour) = settings.hour_range;
    let hour = entropy.between(first_hour, last_hour);
    let minute = entropy.between(0, 59);

    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    let local = date.and_time(time);
    let offset = settings.offset();
    let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// `"<kind>: <pattern>"` for a template drawn uniformly from `templates`
pub fn compose_message(
    templates: &[CommitMessageTemplate],
    path: &str,
    entropy: &mut impl Entropy,
) -> String {
    let name = base_name(path);
    match templates.get(entropy.index(templates.len())) {
        Some(template) => template.render(name),
        None => format!("{}: Update {name}", CommitKind::Chore),
    }
}

/// Spread `changes` over the window, at most `commits_per_day` per day
///
/// Each day takes the next `commits_per_day` changes in order, or fewer once
/// they run out. A change with nothing to stage is skipped and still counts
/// against its day. Whatever remains after the last day is returned as
/// unscheduled.
pub fn schedule(
    changes: Vec<ChangeEntry>,
    settings: &Settings,
    commits_per_day: usize,
    workdir: &Path,
    entropy: &mut impl Entropy,
) -> Schedule {
    let mut schedule = Schedule {
        discovered: changes.len(),
        ..Default::default()
    };
    let mut pending = changes.into_iter().peekable();

    for day_offset in 0..settings.window_len() {
        if pending.peek().is_none() {
            break;
        }

        for entry in pending.by_ref().take(commits_per_day) {
            let Some(staging) = Staging::for_entry(&entry, workdir) else {
                warn!(
                    path = %entry.path,
                    "Skipping {}: file does not exist and is not marked as deleted",
                    entry.path
                );
                schedule.skipped.push(entry);
                continue;
            };

            let timestamp = next_commit_time(settings, day_offset, entropy);
            let message = compose_message(&settings.templates, &entry.path, entropy);
            debug!(day_offset, path = %entry.path, %timestamp, "Scheduled commit");
            schedule.commits.push(CommitPlan {
                day_offset,
                timestamp,
                message,
                staging,
                entry,
            });
        }
    }

    schedule.unscheduled.extend(pending);
    if !schedule.unscheduled.is_empty() {
        warn!(
            "{} changes did not fit in the {}-day window and were left untouched",
            schedule.unscheduled.len(),
            settings.window_len()
        );
    }
    schedule
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::entropy::RandomEntropy;
    use crate::template::CommitKind;
    use chrono::Timelike;
    use proptest::prelude::*;

    proptest! {
        /// Property: every timestamp lands inside the window at a working hour
        #[test]
        fn prop_timestamps_within_window(seed in any::<u64>(), day in 0u32..3) {
            let settings = Settings::default();
            let mut entropy = RandomEntropy::seeded(seed);
            let timestamp = next_commit_time(&settings, day, &mut entropy);
            let date = timestamp.date_naive();
            prop_assert!(date >= settings.window_start && date <= settings.window_end);
            prop_assert!((8..=20).contains(&timestamp.hour()));
            prop_assert!(timestamp.minute() <= 59);
            prop_assert_eq!(timestamp.second(), 0);
            prop_assert_eq!(timestamp.offset().local_minus_utc(), 7200);
        }

        /// Property: messages are "<kind>: ..." and mention the base name
        #[test]
        fn prop_message_shape(seed in any::<u64>(), path in "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.[a-z]{1,3}") {
            let settings = Settings::default();
            let mut entropy = RandomEntropy::seeded(seed);
            let message = compose_message(&settings.templates, &path, &mut entropy);
            let (kind, text) = message.split_once(": ").expect("kind separator");
            prop_assert!(CommitKind::ALL.iter().any(|k| k.as_str() == kind));
            prop_assert!(text.contains(base_name(&path)));
        }

        /// Property: N changes, D days, K per day -> min(N, D*K) commits, <= K a day
        #[test]
        fn prop_commit_count(n in 0usize..40, k in 1usize..8, seed in any::<u64>()) {
            let settings = Settings::default();
            let days = settings.window_len() as usize;
            let changes: Vec<ChangeEntry> = (0..n)
                .map(|i| ChangeEntry::new(format!("f{i}"), ChangeStatus::Deleted))
                .collect();
            let mut entropy = RandomEntropy::seeded(seed);
            let schedule = schedule(
                changes,
                &settings,
                k,
                Path::new("/nonexistent/retrodate-workdir"),
                &mut entropy,
            );
            prop_assert_eq!(schedule.commits.len(), n.min(days * k));
            prop_assert_eq!(schedule.commits.len() + schedule.unscheduled.len(), n);
            prop_assert_eq!(schedule.discovered, n);
            for day in 0..settings.window_len() {
                prop_assert!(schedule.commits_on(day) <= k);
            }
        }
    }
}
