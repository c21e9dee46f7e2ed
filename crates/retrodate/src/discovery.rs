// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Change discovery
//!
//! Collects every path worth committing from three sources, in order: the
//! porcelain status, the untracked-file listing, and a walk of the configured
//! directories. The first source to report a path decides its status; later
//! sources never duplicate it. Paths containing an excluded fragment are
//! dropped whatever their source.

use std::collections::HashSet;
use std::path::Path;

use retrodate_git::{ChangeEntry, VersionControl, parse_status};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::SynthError;
use crate::settings::Settings;

/// Discover the changed, deleted and untracked paths of the working tree
///
/// An empty result is not an error.
///
/// # Errors
///
/// Returns `SynthError::Discovery` if a status line cannot be parsed, or
/// `SynthError::Git` if the repository cannot be queried.
pub fn discover_changes(
    vcs: &dyn VersionControl,
    settings: &Settings,
) -> Result<Vec<ChangeEntry>, SynthError> {
    let mut found = Discovered::new(settings);

    let status = vcs.status()?;
    for entry in parse_status(&status).map_err(SynthError::Discovery)? {
        found.insert(entry);
    }

    for path in vcs.untracked_files()? {
        found.insert(ChangeEntry::untracked(path));
    }

    for directory in &settings.directories {
        for path in walk_directory(vcs.workdir(), directory, settings) {
            found.insert(ChangeEntry::untracked(path));
        }
    }

    debug!(count = found.entries.len(), "Discovered changes");
    Ok(found.entries)
}

/// Deduplicating, exclusion-aware accumulator
struct Discovered<'a> {
    settings: &'a Settings,
    seen: HashSet<String>,
    entries: Vec<ChangeEntry>,
}

impl<'a> Discovered<'a> {
    fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            seen: HashSet::new(),
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, entry: ChangeEntry) {
        if self.settings.is_excluded(&entry.path) {
            debug!(path = %entry.path, "Excluded");
            return;
        }
        if self.seen.insert(entry.path.clone()) {
            self.entries.push(entry);
        }
    }
}

/// Files under `workdir/directory`, as `/`-separated paths relative to `workdir`
///
/// A missing directory yields nothing. Excluded subtrees are not descended
/// into, and unreadable entries are logged and skipped.
fn walk_directory(workdir: &Path, directory: &str, settings: &Settings) -> Vec<String> {
    let root = workdir.join(directory);
    if !root.is_dir() {
        debug!(directory, "Directory not present, not walking");
        return Vec::new();
    }

    WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            relative_path(workdir, entry.path())
                .is_none_or(|path| !settings.is_excluded(&path))
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {directory}: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = relative_path(workdir, entry.path());
            if path.is_none() {
                warn!("Skipping non UTF-8 path {}", entry.path().display());
            }
            path
        })
        .collect()
}

/// `path` relative to `workdir`, joined with `/`
fn relative_path(workdir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(workdir).ok()?;
    let parts = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}
