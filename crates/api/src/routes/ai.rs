use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /summarize   -> summarize
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/summarize", post(ai::summarize))
}
