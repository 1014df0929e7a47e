//! Typed client for the Gemini `generateContent` API.

pub mod client;
pub mod types;

pub use client::{Client, ClientBuilder, GeminiError, GeminiModel};
pub use types::{
    Candidate, CompletionBackend, Content, FunctionCall, FunctionDeclaration, FunctionResponse,
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, Role, ToolDeclaration,
};
