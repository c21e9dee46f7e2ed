//! Command-line configuration for retrodate
//!
//! This module provides the CLI definition and helpers to resolve the
//! repository path, settings and logging options from it.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::settings::{Settings, SettingsError};

/// Default number of commits placed on each day of the window
pub const DEFAULT_COMMITS_PER_DAY: u32 = 5;

/// Retrodate - spread working-tree changes over backdated commits
#[derive(Parser, Debug, Clone)]
#[command(name = "retrodate")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Maximum number of commits created on each day of the window
    #[arg(
        short = 'n',
        long,
        env = "RETRODATE_COMMITS_PER_DAY",
        default_value_t = DEFAULT_COMMITS_PER_DAY,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub commits_per_day: u32,

    /// Path inside the repository to rewrite
    ///
    /// The repository root is discovered upward from this path.
    /// Defaults to the current working directory.
    #[arg(short, long, env = "RETRODATE_REPO")]
    pub repo: Option<PathBuf>,

    /// JSON settings file (window, hours, exclusions, remote, templates)
    ///
    /// Fields missing from the file keep their built-in defaults.
    #[arg(short, long, env = "RETRODATE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Seed for the random source, making a run reproducible
    #[arg(long, env = "RETRODATE_SEED")]
    pub seed: Option<u64>,

    /// How to talk to the repository
    #[arg(long, value_enum, default_value_t = Backend::Cli)]
    pub backend: Backend,

    /// Print the planned commits as JSON and change nothing
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Leave the remote URL untouched
    #[arg(long, default_value = "false")]
    pub keep_remote: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs every git invocation and scheduling decision.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Repository backends
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Run the `git` executable
    #[default]
    Cli,
    /// Use libgit2 in-process
    Libgit2,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commits_per_day: DEFAULT_COMMITS_PER_DAY,
            repo: None,
            settings: None,
            seed: None,
            backend: Backend::default(),
            dry_run: false,
            keep_remote: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Get the repository path, using current directory as default
    ///
    /// Returns `None` if no path is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        self.repo.clone().or_else(|| std::env::current_dir().ok())
    }

    /// Commits per day as a count
    #[must_use]
    pub fn commits_per_day(&self) -> usize {
        self.commits_per_day as usize
    }

    /// Load the settings file, or the defaults when none was given
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file cannot be read or is invalid.
    pub fn load_settings(&self) -> Result<Settings, SettingsError> {
        match &self.settings {
            Some(path) => Settings::load(path),
            None => Ok(Settings::default()),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is specified but doesn't exist
    /// - The repository path is not a directory
    /// - Commits per day is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref repo) = self.repo {
            if !repo.exists() {
                return Err(ConfigError::RepoNotFound(repo.clone()));
            }
            if !repo.is_dir() {
                return Err(ConfigError::RepoNotDirectory(repo.clone()));
            }
        }

        if self.commits_per_day == 0 {
            return Err(ConfigError::NoCommitsPerDay);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepoNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepoNotDirectory(PathBuf),

    /// Zero commits per day would never commit anything
    #[error("Commits per day must be at least 1")]
    NoCommitsPerDay,
}
