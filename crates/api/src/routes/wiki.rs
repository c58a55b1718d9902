//! Server-rendered HTML routes, mounted at the root.

use axum::routing::get;
use axum::Router;

use crate::handlers::wiki;
use crate::state::AppState;

/// ```text
/// GET /             index
/// GET /wiki/{id}    show
/// GET /search       search
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wiki::index))
        .route("/wiki/{id}", get(wiki::show))
        .route("/search", get(wiki::search))
}
