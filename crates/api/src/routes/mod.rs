pub mod ai;
pub mod auth;
pub mod health;
pub mod pages;
pub mod upload;
pub mod wiki;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
/// /auth/logout                    logout (public)
/// /auth/me                        session user and capabilities
///
/// /pages                          list (?q= to search), create (editor+)
/// /pages/{id}                     get, update (editor+), delete (admin)
///
/// /upload                         multipart file upload (editor+)
/// /ai/summarize                   stub AI actions (signed in)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/pages", pages::router())
        .nest("/upload", upload::router())
        .nest("/ai", ai::router())
}
