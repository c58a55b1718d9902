//! Handlers for the `/auth` resource (login, logout, me).
//!
//! Sign-in is by email only. The directory is fixed, so there is nothing to
//! verify beyond the address existing.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wikimasters_core::error::CoreError;
use wikimasters_core::roles::{can_delete_pages, can_edit_pages};
use wikimasters_db::models::user::User;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::session::{clear_session_cookie, SessionToken};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// The session user and what they may do.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: Option<User>,
    pub can_edit: bool,
    pub can_delete: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Start a session for the user with the given email.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    input.validate().map_err(|e| {
        tracing::debug!(error = %e, "Rejected login request");
        AppError::Core(CoreError::Validation("A valid email is required".into()))
    })?;

    let user = state
        .users
        .find_by_email(input.email.trim())
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Unknown user"))?;

    let cookie = SessionToken::for_user(&user).to_cookie(state.config.cookie_secure);

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(([(SET_COOKIE, cookie)], Json(LoginResponse { user })))
}

/// POST /api/auth/logout
///
/// Clear the session cookie. Succeeds whether or not a session existed.
pub async fn logout(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    if let Some(user) = user {
        tracing::info!(user_id = user.id, "User logged out");
    }

    (
        [(SET_COOKIE, clear_session_cookie(state.config.cookie_secure))],
        Json(LogoutResponse { success: true }),
    )
}

/// GET /api/auth/me
pub async fn me(current: CurrentUser) -> Json<MeResponse> {
    let role = current.role();
    Json(MeResponse {
        user: current.0,
        can_edit: can_edit_pages(role),
        can_delete: can_delete_pages(role),
    })
}
