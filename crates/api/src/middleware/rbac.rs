//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`CurrentUser`] and rejects requests whose role does
//! not meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use wikimasters_core::roles::{
    can_delete_pages, can_edit_pages, can_view_pages, is_authenticated,
};
use wikimasters_db::models::user::User;

use super::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

async fn current_user(parts: &mut Parts, state: &AppState) -> CurrentUser {
    match CurrentUser::from_request_parts(parts, state).await {
        Ok(user) => user,
        Err(never) => match never {},
    }
}

/// Requires the `admin` role. Rejects with 401 Unauthorized otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = current_user(parts, state).await;
        match current.0 {
            Some(user) if can_delete_pages(Some(user.role)) => Ok(RequireAdmin(user)),
            _ => Err(AppError::unauthorized("Unauthorized")),
        }
    }
}

/// Requires `editor` or `admin` role. Rejects with 401 Unauthorized otherwise.
pub struct RequireEditor(pub User);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = current_user(parts, state).await;
        match current.0 {
            Some(user) if can_edit_pages(Some(user.role)) => Ok(RequireEditor(user)),
            _ => Err(AppError::unauthorized("Unauthorized")),
        }
    }
}

/// Requires any signed-in user, whatever the role.
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = current_user(parts, state).await;
        match current.0 {
            Some(user) if is_authenticated(Some(user.role)) => Ok(RequireAuth(user)),
            _ => Err(AppError::unauthorized("Unauthorized - must be logged in")),
        }
    }
}

/// Requires read access to pages. Guests pass; the session user, if any, is
/// handed through for rendering.
pub struct RequireView(pub Option<User>);

impl FromRequestParts<AppState> for RequireView {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = current_user(parts, state).await;
        if can_view_pages(current.role()) {
            Ok(RequireView(current.0))
        } else {
            Err(AppError::unauthorized("Unauthorized"))
        }
    }
}
