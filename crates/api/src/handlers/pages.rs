//! Handlers for the `/pages` resource.
//!
//! Mutations check permission first, then the id, then the body, and only
//! then touch the store.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use wikimasters_core::error::CoreError;
use wikimasters_core::pages::{parse_page_id, validate_page_fields};
use wikimasters_core::types::DbId;
use wikimasters_db::models::page::{CreatePage, Page, UpdatePage};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor, RequireView};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct ListPagesParams {
    pub q: Option<String>,
}

/// Body accepted by create and update. Both fields are required; they are
/// optional here so a missing field becomes a validation error, not a
/// deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct PageBody {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PageBody {
    /// Check both fields and hand them back.
    fn into_fields(self) -> AppResult<(String, String)> {
        validate_page_fields(self.title.as_deref(), self.content.as_deref())?;
        match (self.title, self.content) {
            (Some(title), Some(content)) => Ok((title, content)),
            _ => Err(CoreError::Validation("Title and content are required".into()).into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Page", id })
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /api/pages
///
/// List every page, or only those matching `?q=` when given.
pub async fn list_pages(
    _view: RequireView,
    State(state): State<AppState>,
    Query(params): Query<ListPagesParams>,
) -> AppResult<Json<Vec<Page>>> {
    let pages = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => state.store.search(q).await?,
        _ => state.store.list().await?,
    };
    Ok(Json(pages))
}

/// POST /api/pages
///
/// Create a page authored by the session user. Requires editor or admin.
pub async fn create_page(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    body: Result<Json<PageBody>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body?;
    let (title, content) = body.into_fields()?;

    let page = state
        .store
        .create(CreatePage {
            title,
            content,
            author_id: user.id,
            author_name: Some(user.name.clone()),
        })
        .await?;

    tracing::info!(user_id = user.id, page_id = page.id, "Page created");

    Ok((StatusCode::CREATED, Json(page)))
}

/// GET /api/pages/{id}
pub async fn get_page(
    _view: RequireView,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Page>> {
    let id = parse_page_id(&raw_id)?;
    let page = state.store.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(page))
}

/// PUT /api/pages/{id}
///
/// Replace a page's title and content. Requires editor or admin.
pub async fn update_page(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<PageBody>, JsonRejection>,
) -> AppResult<Json<Page>> {
    let id = parse_page_id(&raw_id)?;
    let Json(body) = body?;
    let (title, content) = body.into_fields()?;

    let page = state
        .store
        .update(
            id,
            UpdatePage {
                title: Some(title),
                content: Some(content),
            },
        )
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = user.id, page_id = id, "Page updated");

    Ok(Json(page))
}

/// DELETE /api/pages/{id}
///
/// Requires admin.
pub async fn delete_page(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let id = parse_page_id(&raw_id)?;

    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(user_id = user.id, page_id = id, "Page deleted");

    Ok(Json(DeleteResponse { success: true }))
}
