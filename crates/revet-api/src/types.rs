//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /review`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Directory to review.
    pub directory_path: String,
    /// Gemini API key used for this session only.
    pub api_key: String,
    /// Model override; the server default applies when absent.
    #[serde(default)]
    pub model: Option<String>,
    /// Declare the write_file tool so the model may apply fixes.
    #[serde(default)]
    pub apply_fixes: bool,
}

/// Success body of `POST /review`.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub status: String,
    pub message: String,
    pub summary_file: String,
}

/// Body of `POST /explain`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub code: String,
    pub language: String,
    pub api_key: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Success body of `POST /explain`.
#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

/// Error body carried on 500 responses.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}
