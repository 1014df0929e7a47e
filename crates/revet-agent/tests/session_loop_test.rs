//! Conversation driver tests against scripted model backends.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use revet_agent::config::limits::MAX_TOOL_TURNS;
use revet_agent::gemini::{
    Candidate, CompletionBackend, Content, FunctionCall, GeminiError, GenerateContentRequest,
    GenerateContentResponse, Part, Role,
};
use revet_agent::session::{ReviewSession, SessionError};
use revet_agent::{run_review, ReviewStatus};

fn text_reply(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Role::Model,
                parts: vec![Part::text(text)],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
    }
}

fn tool_reply(name: &str, args: serde_json::Value) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Role::Model,
                parts: vec![Part::function_call(FunctionCall {
                    name: name.to_string(),
                    args,
                })],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
    }
}

/// Replays a fixed list of replies; errors once the script runs dry.
struct ScriptedBackend {
    script: Mutex<VecDeque<GenerateContentResponse>>,
    invocations: AtomicUsize,
}

impl ScriptedBackend {
    fn new(replies: Vec<GenerateContentResponse>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            invocations: AtomicUsize::new(0),
        }
    }

    fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn generate(
        &self,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(GeminiError::EmptyReply)
    }
}

/// Requests the same tool forever; exercises the turn-limit guard.
struct LoopingBackend {
    dir: String,
    invocations: AtomicUsize,
}

#[async_trait]
impl CompletionBackend for LoopingBackend {
    async fn generate(
        &self,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Ok(tool_reply("list_files", json!({ "dir_path": self.dir })))
    }
}

#[tokio::test]
async fn terminal_reply_on_first_turn_makes_exactly_one_model_call() -> Result<()> {
    let backend = ScriptedBackend::new(vec![text_reply(r#"{"summary":{},"issues":[]}"#)]);
    let mut session = ReviewSession::new(&backend, "/tmp/app", false);

    let text = session.drive().await?;

    assert_eq!(backend.invocations(), 1);
    assert_eq!(text, r#"{"summary":{},"issues":[]}"#);
    // Only the opening prompt; no tool pair was appended.
    assert_eq!(session.transcript().len(), 1);
    Ok(())
}

#[tokio::test]
async fn one_tool_turn_appends_exactly_one_call_response_pair() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("main.py"), "print('hi')")?;
    let dir_path = dir.path().to_string_lossy().into_owned();

    let backend = ScriptedBackend::new(vec![
        tool_reply("list_files", json!({ "dir_path": dir_path })),
        text_reply(r#"{"summary":{"total_files_analyzed":1},"issues":[]}"#),
    ]);
    let mut session = ReviewSession::new(&backend, dir.path().to_string_lossy(), false);

    session.drive().await?;

    assert_eq!(backend.invocations(), 2);

    // Opening prompt, then the invocation/result pair in order.
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].role, Role::Model);
    let call = transcript[1].first_function_call().unwrap();
    assert_eq!(call.name, "list_files");

    assert_eq!(transcript[2].role, Role::User);
    let response = transcript[2].parts[0].function_response.as_ref().unwrap();
    assert_eq!(response.name, "list_files");
    let listed = response.response["result"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_tool_is_fed_back_as_an_error_payload() -> Result<()> {
    let backend = ScriptedBackend::new(vec![
        tool_reply("delete_file", json!({ "file_path": "/tmp/x" })),
        text_reply(r#"{"summary":{},"issues":[]}"#),
    ]);
    let mut session = ReviewSession::new(&backend, "/tmp/app", false);

    session.drive().await?;

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    let response = transcript[2].parts[0].function_response.as_ref().unwrap();
    assert_eq!(response.name, "delete_file");
    assert!(response.response["error"]
        .as_str()
        .unwrap()
        .contains("unsupported tool"));
    Ok(())
}

#[tokio::test]
async fn endless_tool_requests_hit_the_turn_limit() {
    let dir = tempfile::tempdir().unwrap();
    let backend = LoopingBackend {
        dir: dir.path().to_string_lossy().into_owned(),
        invocations: AtomicUsize::new(0),
    };
    let mut session = ReviewSession::new(&backend, dir.path().to_string_lossy(), false);

    let err = session.drive().await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::TurnLimitExceeded {
            limit: MAX_TOOL_TURNS
        }
    ));
    assert_eq!(backend.invocations.load(Ordering::SeqCst), MAX_TOOL_TURNS);
}

#[tokio::test]
async fn run_review_writes_summaries_and_reports_completion() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("main.py"), "print('hi')")?;

    let backend = ScriptedBackend::new(vec![text_reply(
        r#"{"summary":{"total_files_analyzed":1,"total_issues":1,"critical":0,"major":1,"minor":0},
           "issues":[{"file":"main.py","line_start":1,"line_end":1,"severity":"MAJOR",
           "category":"QUALITY","comment":"debug print left in"}]}"#,
    )]);

    let outcome = run_review(&backend, &dir.path().to_string_lossy(), false).await?;

    assert_eq!(outcome.status, ReviewStatus::Completed);
    assert_eq!(outcome.result.issues.len(), 1);

    let text = std::fs::read_to_string(&outcome.summary_file)?;
    assert!(text.contains("Total Issues Found: 1"));
    assert!(text.contains("- main.py:1 – debug print left in"));
    assert!(dir.path().join("CODE_REVIEW_SUMMARY.json").exists());
    Ok(())
}

#[tokio::test]
async fn run_review_degrades_to_empty_result_on_model_failure() -> Result<()> {
    let dir = tempfile::tempdir()?;

    // Script is empty, so the first call errors out.
    let backend = ScriptedBackend::new(vec![]);
    let outcome = run_review(&backend, &dir.path().to_string_lossy(), false).await?;

    assert_eq!(outcome.status, ReviewStatus::Failed);
    assert!(outcome.result.issues.is_empty());
    // The summary files are still written.
    assert!(outcome.summary_file.exists());
    assert!(dir.path().join("CODE_REVIEW_SUMMARY.json").exists());
    Ok(())
}

#[tokio::test]
async fn run_review_degrades_to_empty_result_on_unparseable_reply() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let backend = ScriptedBackend::new(vec![text_reply("I could not find any issues, cheers!")]);
    let outcome = run_review(&backend, &dir.path().to_string_lossy(), false).await?;

    assert_eq!(outcome.status, ReviewStatus::Completed);
    assert!(outcome.result.issues.is_empty());
    assert!(outcome.summary_file.exists());
    Ok(())
}

#[tokio::test]
async fn run_review_rejects_a_missing_directory() {
    let backend = ScriptedBackend::new(vec![]);
    let err = run_review(&backend, "/definitely/not/a/dir", false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Not a directory"));
    assert_eq!(backend.invocations(), 0);
}
