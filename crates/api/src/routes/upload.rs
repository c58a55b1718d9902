use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use wikimasters_core::upload::MAX_UPLOAD_BYTES;

use crate::handlers::upload;
use crate::state::AppState;

/// Headroom above the file size limit so oversized files reach the handler
/// and get a validation error instead of a bare 413.
const UPLOAD_BODY_LIMIT: usize = (MAX_UPLOAD_BYTES as usize) * 2;

/// Routes mounted at `/upload`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload::upload_file))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
