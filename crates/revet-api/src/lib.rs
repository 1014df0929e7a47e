use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use revet_agent::config::model;
use revet_agent::gemini::{Client, GeminiModel};

pub mod types;

use types::{ErrorDetail, ExplainRequest, ExplainResponse, ReviewRequest, ReviewResponse};

/// API state shared across requests.
///
/// Holds only immutable configuration and the pooled HTTP client; each
/// request builds its own session, so concurrent reviews are independent.
#[derive(Clone)]
pub struct ApiState {
    pub http_client: reqwest::Client,
    pub default_model: String,
    pub gemini_base_url: Option<String>,
}

impl ApiState {
    /// Build state from the environment: `REVET_MODEL` and
    /// `GEMINI_API_BASE_URL` overrides, with library defaults otherwise.
    pub fn from_env() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            default_model: std::env::var(model::MODEL_ENV)
                .unwrap_or_else(|_| model::DEFAULT_MODEL.to_string()),
            gemini_base_url: std::env::var("GEMINI_API_BASE_URL").ok(),
        }
    }

    fn backend(&self, api_key: &str, model_override: Option<&str>) -> GeminiModel {
        let mut builder = Client::builder(api_key).custom_client(self.http_client.clone());
        if let Some(base_url) = self.gemini_base_url.as_deref() {
            builder = builder.base_url(base_url);
        }
        let model_name = model_override.unwrap_or(&self.default_model);
        GeminiModel::new(builder.build(), model_name)
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Create API router with all endpoints
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/review", post(review_code))
        .route("/explain", post(explain_code))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(response)
}

/// Axum handler for the `POST /review` endpoint.
///
/// Blocks for the entire multi-turn model conversation; the session's own
/// guard degrades internal failures to an empty-but-written summary, so a
/// 500 here means the review could not even produce its output files.
async fn review_code(State(state): State<ApiState>, Json(payload): Json<ReviewRequest>) -> Response {
    info!("[revet-api] review requested for: {}", payload.directory_path);

    let backend = state.backend(&payload.api_key, payload.model.as_deref());

    match revet_agent::run_review(&backend, &payload.directory_path, payload.apply_fixes).await {
        Ok(outcome) => {
            let response = ReviewResponse {
                status: "success".to_string(),
                message: outcome.status.message().to_string(),
                summary_file: outcome.summary_file.to_string_lossy().into_owned(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("[revet-api] review failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDetail {
                    detail: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Axum handler for the `POST /explain` endpoint: a single model turn with
/// no tool loop.
async fn explain_code(
    State(state): State<ApiState>,
    Json(payload): Json<ExplainRequest>,
) -> Response {
    info!("[revet-api] explanation requested ({})", payload.language);

    let backend = state.backend(&payload.api_key, payload.model.as_deref());

    match revet_agent::explain(&backend, &payload.code, &payload.language).await {
        Ok(explanation) => (StatusCode::OK, Json(ExplainResponse { explanation })).into_response(),
        Err(e) => {
            error!("[revet-api] explanation failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDetail {
                    detail: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
