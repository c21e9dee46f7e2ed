// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Synthesis settings
//!
//! Everything that shapes a run apart from the per-day commit count: the date
//! window, working hours, timezone, which paths to ignore or walk, the remote
//! to repoint and the message template pool. Settings are read from a JSON file;
//! any field left out keeps its default.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::template::{CommitMessageTemplate, default_templates};

/// Remote to repoint before committing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteSettings {
    /// Remote name, usually `origin`
    pub name: String,
    /// New fetch/push URL
    pub url: String,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            name: "origin".to_string(),
            url: "git@github.com:asimwe1/genzura.git".to_string(),
        }
    }
}

/// Parameters of a history synthesis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// First calendar day that receives commits
    pub window_start: NaiveDate,
    /// Last calendar day that receives commits (inclusive)
    pub window_end: NaiveDate,
    /// Inclusive range of hours a commit may be placed at
    pub hour_range: (u32, u32),
    /// Offset from UTC, in minutes, of every fabricated timestamp
    pub utc_offset_minutes: i32,
    /// Paths containing any of these substrings are never committed
    pub excluded_fragments: Vec<String>,
    /// Remote rewritten before the run
    pub remote: RemoteSettings,
    /// Directories walked for files git does not report individually
    pub directories: Vec<String>,
    /// Message templates, one drawn per commit
    pub templates: Vec<CommitMessageTemplate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_start: NaiveDate::from_ymd_opt(2025, 7, 12).unwrap_or_default(),
            window_end: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap_or_default(),
            hour_range: (8, 20),
            utc_offset_minutes: 120,
            excluded_fragments: [".next", ".git", "node_modules"]
                .into_iter()
                .map(String::from)
                .collect(),
            remote: RemoteSettings::default(),
            directories: [
                "app/departments/",
                "app/manage-store/",
                "app/others/",
                "app/payroll/",
                "app/products/",
                "app/reports/",
                "app/settings/",
                "app/suppliers/",
                "hooks/",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            templates: default_templates(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON for
    /// these settings, or fails [`Settings::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Read(path.to_path_buf(), e))?;
        let settings: Self = serde_json::from_str(&text)
            .map_err(|e| SettingsError::Parse(path.to_path_buf(), e))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings describe a usable run
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The window ends before it starts
    /// - The hour range is reversed or leaves 0..=23
    /// - The UTC offset is a day or more
    /// - The template pool is empty or a template lacks its single placeholder
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.window_end < self.window_start {
            return Err(SettingsError::InvalidWindow {
                start: self.window_start,
                end: self.window_end,
            });
        }

        let (first, last) = self.hour_range;
        if first > last || last > 23 {
            return Err(SettingsError::InvalidHours(first, last));
        }

        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(SettingsError::InvalidOffset(self.utc_offset_minutes));
        }

        if self.templates.is_empty() {
            return Err(SettingsError::NoTemplates);
        }
        if let Some(bad) = self.templates.iter().find(|t| !t.is_valid()) {
            return Err(SettingsError::InvalidTemplate(bad.pattern.clone()));
        }

        Ok(())
    }

    /// Number of calendar days in the window, both ends included
    #[must_use]
    pub fn window_len(&self) -> u32 {
        let days = (self.window_end - self.window_start).num_days() + 1;
        u32::try_from(days).unwrap_or(0)
    }

    /// The fixed offset applied to fabricated timestamps
    ///
    /// Falls back to UTC for offsets that [`Settings::validate`] rejects.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Whether `path` contains one of the excluded fragments
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_fragments
            .iter()
            .any(|fragment| !fragment.is_empty() && path.contains(fragment.as_str()))
    }
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("Failed to read settings file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    /// Settings file is not valid JSON for [`Settings`]
    #[error("Invalid settings file {0}: {1}")]
    Parse(PathBuf, serde_json::Error),

    /// Window end precedes its start
    #[error("Window end {end} is before window start {start}")]
    InvalidWindow {
        /// Configured first day
        start: NaiveDate,
        /// Configured last day
        end: NaiveDate,
    },

    /// Hour range is reversed or out of bounds
    #[error("Hour range {0}..={1} must be ordered and within 0..=23")]
    InvalidHours(u32, u32),

    /// UTC offset is a day or more
    #[error("UTC offset of {0} minutes is out of range")]
    InvalidOffset(i32),

    /// Template pool is empty
    #[error("At least one commit message template is required")]
    NoTemplates,

    /// Template lacks exactly one placeholder
    #[error("Template {0:?} must contain exactly one {{}} placeholder")]
    InvalidTemplate(String),
}
