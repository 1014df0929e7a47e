//! Gemini `generateContent` wire types.
//!
//! The shapes mirror the upstream API: camelCase keys, `contents` as a list
//! of role-tagged messages whose parts carry free text, a `functionCall`,
//! or a `functionResponse`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::GeminiError;

/// Message author. The client/tool-result side is `user`, the LLM side is
/// `model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// The result of a tool invocation, fed back to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionResponse {
    pub name: String,
    pub response: serde_json::Value,
}

/// One segment of a message. Exactly one of the fields is set.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn function_call(call: FunctionCall) -> Self {
        Self {
            function_call: Some(call),
            ..Self::default()
        }
    }

    pub fn function_response(name: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            function_response: Some(FunctionResponse {
                name: name.into(),
                response,
            }),
            ..Self::default()
        }
    }
}

/// One message of the transcript: a role plus one or more parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::text(text)],
        }
    }

    pub fn model_function_call(call: FunctionCall) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::function_call(call)],
        }
    }

    /// A tool result is carried back on the `user` role, matching the
    /// upstream calling convention.
    pub fn user_function_response(name: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::function_response(name, response)],
        }
    }

    /// The first tool invocation in this message, if any. Later invocations
    /// in the same message are ignored.
    pub fn first_function_call(&self) -> Option<&FunctionCall> {
        self.parts.iter().find_map(|p| p.function_call.as_ref())
    }

    /// All free-text segments concatenated.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

/// A declared callable tool: name, description and JSON-schema parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Wrapper grouping the function declarations of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDeclaration {
    pub function_declarations: Vec<FunctionDeclaration>,
}

/// Generation knobs; only what this service sets.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// The full request body for one `generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDeclaration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_content(&self) -> Option<&Content> {
        self.candidates.first().and_then(|c| c.content.as_ref())
    }

    /// The first tool invocation of the first candidate, if any.
    pub fn first_function_call(&self) -> Option<&FunctionCall> {
        self.first_content().and_then(|c| c.first_function_call())
    }

    /// The concatenated free text of the first candidate.
    pub fn text(&self) -> String {
        self.first_content().map(|c| c.text()).unwrap_or_default()
    }
}

/// The seam between the conversation driver and the model service.
///
/// `GeminiModel` is the production implementation; tests drive the loop
/// with a scripted fake.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError>;
}
