//! HTTP route handlers for the summary relay.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use summary_mailer::Mailer;

use crate::types::{ApiResponse, EmailRequest, SummaryRequest};
use crate::Summarizer;

use super::state::AppState;

pub const HEALTH_MESSAGE: &str = "✅ Backend is running!";

/// Create the API router with all routes.
pub fn create_router<S, M>(state: Arc<AppState<S, M>>) -> Router
where
    S: Summarizer + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(health_check))
        .route("/api/summary", post(summarize_transcript::<S, M>))
        .route("/send-email", post(send_email::<S, M>))
        .with_state(state)
}

async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}

/// Chunk, summarize and bullet-format a transcript.
async fn summarize_transcript<S, M>(
    State(state): State<Arc<AppState<S, M>>>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Json<ApiResponse>
where
    S: Summarizer + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected summary request body");
            return Json(ApiResponse::error(rejection.body_text()));
        }
    };

    if let Some(prompt) = request.prompt.as_deref().filter(|p| !p.is_empty()) {
        tracing::debug!(%prompt, "Ignoring prompt, model accepts raw inputs only");
    }

    let transcript = request.transcript.unwrap_or_default();
    match state.pipeline.run(&transcript).await {
        Ok(summary) => Json(ApiResponse::summary(summary)),
        Err(e) => {
            tracing::error!(error = %e, "Summary error");
            Json(ApiResponse::error(e.to_string()))
        }
    }
}

/// Email an (edited) summary to a single recipient.
async fn send_email<S, M>(
    State(state): State<Arc<AppState<S, M>>>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Json<ApiResponse>
where
    S: Summarizer + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected email request body");
            return Json(ApiResponse::error(rejection.body_text()));
        }
    };

    let (Some(text), Some(to)) = (
        request.text.filter(|t| !t.is_empty()),
        request.to.filter(|t| !t.is_empty()),
    ) else {
        return Json(ApiResponse::error("Missing text or recipient"));
    };

    match state.mailer.send_summary(&text, &to).await {
        Ok(()) => Json(ApiResponse::ok()),
        Err(e) => {
            tracing::error!(error = ?e, "Email error");
            Json(ApiResponse::error(format!("{e:#}")))
        }
    }
}
