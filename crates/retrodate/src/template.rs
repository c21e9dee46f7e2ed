//! Conventional-commit message templates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker replaced by the file's base name
pub const PLACEHOLDER: &str = "{}";

/// Conventional-commit type prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKind {
    /// A new feature
    Feat,
    /// A bug fix
    Fix,
    /// Documentation only
    Docs,
    /// Restructuring without behaviour change
    Refactor,
    /// Formatting and styling
    Style,
    /// Tests
    Test,
    /// Maintenance and configuration
    Chore,
}

impl CommitKind {
    /// Every kind, in conventional order
    pub const ALL: [CommitKind; 7] = [
        Self::Feat,
        Self::Fix,
        Self::Docs,
        Self::Refactor,
        Self::Style,
        Self::Test,
        Self::Chore,
    ];

    /// The prefix as written in a commit subject
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Refactor => "refactor",
            Self::Style => "style",
            Self::Test => "test",
            Self::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message pattern paired with its commit kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessageTemplate {
    /// Prefix of the rendered subject
    pub kind: CommitKind,
    /// Text with a single `{}` placeholder for the file's base name
    pub pattern: String,
}

impl CommitMessageTemplate {
    /// Create a template
    #[must_use]
    pub fn new(kind: CommitKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }

    /// Whether the pattern has exactly one placeholder
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.pattern.matches(PLACEHOLDER).count() == 1
    }

    /// Render `"<kind>: <pattern>"` with `base_name` substituted
    #[must_use]
    pub fn render(&self, base_name: &str) -> String {
        format!(
            "{}: {}",
            self.kind,
            self.pattern.replacen(PLACEHOLDER, base_name, 1)
        )
    }
}

/// The built-in pool, one template per kind
#[must_use]
pub fn default_templates() -> Vec<CommitMessageTemplate> {
    vec![
        CommitMessageTemplate::new(
            CommitKind::Feat,
            "Add {} functionality to enhance inventory management",
        ),
        CommitMessageTemplate::new(CommitKind::Fix, "Fix issue in {} causing display errors"),
        CommitMessageTemplate::new(CommitKind::Docs, "Update {} documentation for better clarity"),
        CommitMessageTemplate::new(CommitKind::Refactor, "Refactor {} to improve code readability"),
        CommitMessageTemplate::new(
            CommitKind::Style,
            "Apply styling updates to {} for consistency",
        ),
        CommitMessageTemplate::new(CommitKind::Test, "Add tests for {} to ensure stability"),
        CommitMessageTemplate::new(
            CommitKind::Chore,
            "Update {} configuration for better performance",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_render_substitutes_base_name() {
        let template = CommitMessageTemplate::new(CommitKind::Fix, "Fix issue in {} causing display errors");
        assert_eq!(
            template.render("page.tsx"),
            "fix: Fix issue in page.tsx causing display errors"
        );
    }

    #[test]
    fn test_default_pool_covers_every_kind_once() {
        let kinds: Vec<CommitKind> = default_templates().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, CommitKind::ALL.to_vec());
        assert!(default_templates().iter().all(CommitMessageTemplate::is_valid));
    }

    #[test]
    fn test_placeholder_count_validation() {
        assert!(!CommitMessageTemplate::new(CommitKind::Docs, "No placeholder").is_valid());
        assert!(!CommitMessageTemplate::new(CommitKind::Docs, "{} and {}").is_valid());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&CommitKind::Refactor).expect("serialize");
        assert_eq!(json, "\"refactor\"");
    }
}
