//! The full review pipeline: drive the session, extract the result, write
//! the summaries.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use revet_types::ReviewResult;

use crate::config::generation;
use crate::extract;
use crate::gemini::{CompletionBackend, Content, GenerateContentRequest, GenerationConfig};
use crate::prompt;
use crate::report;
use crate::session::{ReviewSession, SessionError};

/// How a review session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    /// The model produced a terminal answer (possibly an empty result).
    Completed,
    /// The driver hit its turn limit or a model call timed out.
    Incomplete,
    /// The model conversation failed outright.
    Failed,
}

impl ReviewStatus {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Completed => "Code review completed",
            Self::Incomplete => "Code review incomplete; partial summary written",
            Self::Failed => "Code review failed; empty summary written",
        }
    }
}

/// The outcome of one review: the normalized result plus where the text
/// summary landed.
#[derive(Debug)]
pub struct ReviewOutcome {
    pub result: ReviewResult,
    pub status: ReviewStatus,
    pub summary_file: PathBuf,
}

/// Run one full review session against `directory`.
///
/// Internal failures never abort the review: a failed conversation or an
/// unparseable terminal reply degrades to an empty result, and the summary
/// files are written regardless. Only an invalid directory or a failure to
/// write the summaries is returned as an error.
pub async fn run_review<B: CompletionBackend>(
    backend: &B,
    directory: &str,
    apply_fixes: bool,
) -> Result<ReviewOutcome> {
    let dir = Path::new(directory);
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {directory}");
    }

    let mut session = ReviewSession::new(backend, directory, apply_fixes);
    let (result, status) = match session.drive().await {
        Ok(text) => match extract::review_result(&text) {
            Ok(result) => (result, ReviewStatus::Completed),
            Err(e) => {
                warn!("[review] could not extract result from terminal reply: {e}");
                (ReviewResult::default(), ReviewStatus::Completed)
            }
        },
        Err(e @ SessionError::TurnLimitExceeded { .. })
        | Err(e @ SessionError::ModelTimeout { .. }) => {
            warn!("[review] session cut off: {e}");
            (ReviewResult::default(), ReviewStatus::Incomplete)
        }
        Err(e) => {
            error!("[review] session failed: {e}");
            (ReviewResult::default(), ReviewStatus::Failed)
        }
    };

    info!(
        "[review] {} issues across {} files ({status:?})",
        result.issues.len(),
        result.summary.total_files_analyzed
    );

    let summary_file = report::write_text_summary(dir, &result)?;
    report::write_json_summary(dir, &result)?;

    Ok(ReviewOutcome {
        result,
        status,
        summary_file,
    })
}

/// Single-shot code explanation: one model turn, no tools.
pub async fn explain<B: CompletionBackend>(
    backend: &B,
    code: &str,
    language: &str,
) -> Result<String> {
    let request = GenerateContentRequest {
        system_instruction: None,
        contents: vec![Content::user_text(prompt::explain_prompt(code, language))],
        tools: None,
        generation_config: Some(GenerationConfig {
            temperature: Some(generation::EXPLAIN_TEMPERATURE),
        }),
    };

    let reply = backend
        .generate(&request)
        .await
        .context("Explanation request failed")?;
    Ok(reply.text())
}
