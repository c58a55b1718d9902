//! Cookie-based session extractor for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use wikimasters_core::roles::Role;
use wikimasters_db::models::user::User;

use crate::session::{resolve_session, SessionToken};
use crate::state::AppState;

/// The user behind the request's session cookie, if any.
///
/// Resolution fails open: a missing, malformed or unknown cookie yields
/// `CurrentUser(None)` instead of rejecting the request.
///
/// ```ignore
/// async fn my_handler(CurrentUser(user): CurrentUser) -> Html<String> {
///     let name = user.map(|u| u.name).unwrap_or_else(|| "Guest".into());
///     Html(format!("Hello, {name}"))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn role(&self) -> Option<Role> {
        self.0.as_ref().map(|u| u.role)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = SessionToken::from_headers(&parts.headers)
            .and_then(|token| resolve_session(token.as_str(), &state.users));
        Ok(CurrentUser(user))
    }
}
