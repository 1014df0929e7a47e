//! Gemini API client implementation.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{CompletionBackend, GenerateContentRequest, GenerateContentResponse};

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Errors surfaced by the Gemini client.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("model reply contained no candidates")]
    EmptyReply,

    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
}

/// Gemini client builder.
pub struct ClientBuilder<'a> {
    api_key: &'a str,
    base_url: Option<&'a str>,
    http_client: reqwest::Client,
}

impl<'a> ClientBuilder<'a> {
    pub fn new(api_key: &'a str) -> Self {
        Self {
            api_key,
            base_url: None,
            http_client: reqwest::Client::new(),
        }
    }

    /// Set a custom base URL for the Gemini API.
    pub fn base_url(mut self, base_url: &'a str) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set a custom HTTP client.
    pub fn custom_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    pub fn build(self) -> Client {
        Client::new(
            self.base_url.unwrap_or(GEMINI_API_BASE_URL),
            self.api_key,
            self.http_client,
        )
    }
}

/// Gemini client.
#[derive(Clone)]
pub struct Client {
    pub base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

impl Client {
    pub fn new(base_url: impl Into<String>, api_key: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    pub fn builder(api_key: &str) -> ClientBuilder<'_> {
        ClientBuilder::new(api_key)
    }

    /// Build a client from `GEMINI_API_KEY`, with an optional
    /// `GEMINI_API_BASE_URL` override.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| GeminiError::MissingApiKey)?;
        let base_url = std::env::var("GEMINI_API_BASE_URL")
            .unwrap_or_else(|_| GEMINI_API_BASE_URL.to_string());
        Ok(Self::new(base_url, &api_key, reqwest::Client::new()))
    }

    /// Send one `generateContent` request for the given model.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(GeminiError::Api { status, body });
        }

        let reply: GenerateContentResponse = response.json().await?;
        if reply.candidates.is_empty() {
            return Err(GeminiError::EmptyReply);
        }
        Ok(reply)
    }
}

/// A client pinned to one model id; the production `CompletionBackend`.
#[derive(Debug, Clone)]
pub struct GeminiModel {
    client: Client,
    model: String,
}

impl GeminiModel {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionBackend for GeminiModel {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.client.generate(&self.model, request).await
    }
}
