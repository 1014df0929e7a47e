//! Renders and persists the review summary files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use revet_types::{Category, ReviewResult};

/// Plain-text summary file name, written into the reviewed directory.
pub const SUMMARY_TXT: &str = "CODE_REVIEW_SUMMARY.txt";

/// Machine-readable summary file name.
pub const SUMMARY_JSON: &str = "CODE_REVIEW_SUMMARY.json";

/// The categories with a section in the text report, in render order.
/// Issues in any other category are counted in the header but appear only
/// in the JSON file.
const TEXT_SECTIONS: &[(Category, &str)] = &[
    (Category::Security, "SECURITY FIXES:"),
    (Category::Bug, "BUG FIXES:"),
    (Category::Quality, "CODE QUALITY IMPROVEMENTS:"),
];

/// Render the plain-text report: a header with the totals, then one
/// section per category listing `file:line – comment` in input order.
pub fn render_text(result: &ReviewResult) -> String {
    let mut out = String::new();
    out.push_str("CODE REVIEW COMPLETE\n\n");
    out.push_str(&format!(
        "Total Files Analyzed: {}\n",
        result.summary.total_files_analyzed
    ));
    out.push_str(&format!("Total Issues Found: {}\n", result.issues.len()));

    for (category, heading) in TEXT_SECTIONS {
        out.push('\n');
        out.push_str(heading);
        out.push('\n');
        for issue in result.issues.iter().filter(|i| i.in_category(*category)) {
            out.push_str(&format!(
                "- {}:{} – {}\n",
                issue.file,
                issue.line_start.unwrap_or(0),
                issue.comment
            ));
        }
    }

    out
}

/// Write the text summary into the reviewed directory, returning its path.
pub fn write_text_summary(directory: &Path, result: &ReviewResult) -> Result<PathBuf> {
    let path = directory.join(SUMMARY_TXT);
    std::fs::write(&path, render_text(result))
        .with_context(|| format!("Failed to write text summary to {}", path.display()))?;
    info!("[report] text summary written: {}", path.display());
    Ok(path)
}

/// Persist the normalized result verbatim as JSON, returning its path.
pub fn write_json_summary(directory: &Path, result: &ReviewResult) -> Result<PathBuf> {
    let path = directory.join(SUMMARY_JSON);
    let payload =
        serde_json::to_string_pretty(result).context("Failed to serialize review result")?;
    std::fs::write(&path, payload)
        .with_context(|| format!("Failed to write JSON summary to {}", path.display()))?;
    info!("[report] JSON summary written: {}", path.display());
    Ok(path)
}
