//! Handler for the stub AI endpoint.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};
use wikimasters_core::ai::AiAction;
use wikimasters_core::error::CoreError;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;

#[derive(Debug, Deserialize)]
pub struct AiRequest {
    pub content: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    pub result: String,
    pub action: AiAction,
    /// Always `true`: results are computed locally, not by a model.
    pub is_stub: bool,
}

/// POST /api/ai/summarize
///
/// Runs `action` (default `summarize`) over `content`. Requires a session.
pub async fn summarize(
    auth: RequireAuth,
    body: Result<Json<AiRequest>, JsonRejection>,
) -> AppResult<Json<AiResponse>> {
    let Json(input) = body?;

    let content = input
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| CoreError::Validation("Content is required".into()))?;
    let action: AiAction = input.action.as_deref().unwrap_or("summarize").parse()?;

    tracing::debug!(user_id = auth.0.id, action = action.as_str(), "Running AI stub");

    let result = action.run(&content).await;
    Ok(Json(AiResponse {
        result,
        action,
        is_stub: true,
    }))
}
