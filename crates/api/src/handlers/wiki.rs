//! Server-rendered wiki pages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use wikimasters_core::pages::parse_page_id;

use crate::error::AppResult;
use crate::middleware::rbac::RequireView;
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /
pub async fn index(
    RequireView(user): RequireView,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let pages = state.store.list().await?;
    Ok(Html(views::index_page(&pages, &state.users, user.as_ref())))
}

/// GET /wiki/{id}
///
/// A malformed or unknown id renders the HTML 404 page.
pub async fn show(
    RequireView(user): RequireView,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let page = match parse_page_id(&raw_id) {
        Ok(id) => state.store.get_by_id(id).await?,
        Err(_) => None,
    };

    let response = match page {
        Some(page) => Html(views::article_page(&page, &state.users, user.as_ref())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(views::not_found_page(user.as_ref())),
        )
            .into_response(),
    };
    Ok(response)
}

/// GET /search?q=
pub async fn search(
    RequireView(user): RequireView,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Html<String>> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    let pages = if query.is_empty() {
        Vec::new()
    } else {
        state.store.search(query).await?
    };
    Ok(Html(views::search_page(
        query,
        &pages,
        &state.users,
        user.as_ref(),
    )))
}
