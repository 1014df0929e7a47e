//! The conversation driver: one review session's tool-call loop.

use thiserror::Error;
use tokio::time::{timeout, Duration};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{generation, limits};
use crate::gemini::{
    CompletionBackend, Content, GeminiError, GenerateContentRequest, GenerationConfig,
    ToolDeclaration,
};
use crate::prompt;
use crate::tools::{self, ToolCall};

/// Terminal failures of the conversation driver.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("model call failed: {0}")]
    Model(#[from] GeminiError),

    #[error("tool-call loop exceeded {limit} turns")]
    TurnLimitExceeded { limit: usize },

    #[error("model call timed out after {secs}s")]
    ModelTimeout { secs: u64 },
}

/// One review session: a per-request transcript plus the loop that drives
/// it to a terminal answer.
///
/// The transcript lives and dies with this value; nothing is shared across
/// requests, so concurrent sessions in one process are independent.
pub struct ReviewSession<'a, B: CompletionBackend> {
    backend: &'a B,
    directory: String,
    apply_fixes: bool,
    session_id: Uuid,
    transcript: Vec<Content>,
}

impl<'a, B: CompletionBackend> ReviewSession<'a, B> {
    pub fn new(backend: &'a B, directory: impl Into<String>, apply_fixes: bool) -> Self {
        Self {
            backend,
            directory: directory.into(),
            apply_fixes,
            session_id: Uuid::new_v4(),
            transcript: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The transcript accumulated so far. Every function-call message is
    /// immediately followed by its function-response message.
    pub fn transcript(&self) -> &[Content] {
        &self.transcript
    }

    fn request(&self) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Some(Content::user_text(prompt::system_instruction(
                &self.directory,
                self.apply_fixes,
            ))),
            contents: self.transcript.clone(),
            tools: Some(vec![ToolDeclaration {
                function_declarations: tools::declarations(self.apply_fixes),
            }]),
            generation_config: Some(GenerationConfig {
                temperature: Some(generation::REVIEW_TEMPERATURE),
            }),
        }
    }

    async fn call_model(&self) -> Result<crate::gemini::GenerateContentResponse, SessionError> {
        let secs = limits::MODEL_CALL_TIMEOUT_SECS;
        timeout(Duration::from_secs(secs), self.backend.generate(&self.request()))
            .await
            .map_err(|_| SessionError::ModelTimeout { secs })?
            .map_err(SessionError::from)
    }

    /// Drive the loop to completion and return the terminal free-text
    /// answer.
    ///
    /// Each turn honors at most the FIRST function call in the reply, even
    /// when several are present. A failed tool dispatch is fed back to the
    /// model as an error payload rather than aborting the session. The
    /// loop is bounded by `MAX_TOOL_TURNS`.
    pub async fn drive(&mut self) -> Result<String, SessionError> {
        info!(
            "[session {}] reviewing directory: {}",
            self.session_id, self.directory
        );
        self.transcript.push(Content::user_text(prompt::OPENING_PROMPT));

        for turn in 0..limits::MAX_TOOL_TURNS {
            let reply = self.call_model().await?;

            let Some(call) = reply.first_function_call().cloned() else {
                info!(
                    "[session {}] terminal reply after {turn} tool turns",
                    self.session_id
                );
                return Ok(reply.text());
            };

            info!("[session {}] tool requested: {}", self.session_id, call.name);
            let response = match ToolCall::parse(&call) {
                Ok(tool_call) => tool_call.execute(),
                Err(e) => {
                    warn!("[session {}] tool dispatch failed: {e}", self.session_id);
                    serde_json::json!({ "error": e.to_string() })
                }
            };

            let name = call.name.clone();
            self.transcript.push(Content::model_function_call(call));
            self.transcript
                .push(Content::user_function_response(name, response));
        }

        Err(SessionError::TurnLimitExceeded {
            limit: limits::MAX_TOOL_TURNS,
        })
    }
}
