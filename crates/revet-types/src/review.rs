//! Review result types shared across the workspace.
//!
//! `Issue` keeps `severity` and `category` as plain strings: the model's
//! output is accepted verbatim, and the typed enums below are used for
//! report grouping and prompt text, not for validation on ingest.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Issue severity levels the model is instructed to use.
#[derive(
    Debug, Clone, Copy, Display, EnumString, IntoStaticStr, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum Severity {
    #[strum(serialize = "CRITICAL")]
    Critical,

    #[strum(serialize = "MAJOR")]
    Major,

    #[strum(serialize = "MINOR")]
    Minor,
}

/// Issue categories the model is instructed to use.
///
/// Only the first three have a section in the text report; `Performance`
/// issues are carried in the JSON output and the summary counts.
#[derive(
    Debug, Clone, Copy, Display, EnumString, IntoStaticStr, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum Category {
    #[strum(serialize = "SECURITY")]
    Security,

    #[strum(serialize = "BUG")]
    Bug,

    #[strum(serialize = "QUALITY")]
    Quality,

    #[strum(serialize = "PERFORMANCE")]
    Performance,
}

/// A single review finding reported by the model.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Issue {
    /// Path of the offending file, as the model reported it.
    #[serde(default)]
    pub file: String,
    /// First line of the offending range.
    #[serde(default)]
    pub line_start: Option<u64>,
    /// Last line of the offending range; equal to `line_start` for a single line.
    #[serde(default)]
    pub line_end: Option<u64>,
    /// One of the `Severity` strings, accepted verbatim.
    #[serde(default)]
    pub severity: String,
    /// One of the `Category` strings, accepted verbatim.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub suggested_fix: Option<String>,
}

impl Issue {
    /// Whether this issue belongs to the given category.
    ///
    /// Exact string match: the model's category strings are not normalized.
    pub fn in_category(&self, category: Category) -> bool {
        self.category == <&'static str>::from(category)
    }
}

/// Aggregate counters reported by the model alongside the issue list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReviewSummary {
    #[serde(default)]
    pub total_files_analyzed: u64,
    #[serde(default)]
    pub total_issues: u64,
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub major: u64,
    #[serde(default)]
    pub minor: u64,
}

/// The normalized result of one review session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReviewResult {
    #[serde(default)]
    pub summary: ReviewSummary,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl ReviewResult {
    /// Build a result holding only an issue list, with empty summary counters.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            summary: ReviewSummary::default(),
            issues,
        }
    }
}
