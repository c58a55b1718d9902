//! Cookie-carried sessions.
//!
//! The session cookie holds a raw user id, unsigned. Resolution fails open:
//! a missing, malformed or unknown value means "anonymous", never an error.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use wikimasters_core::types::DbId;
use wikimasters_db::models::user::User;
use wikimasters_db::UserDirectory;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "user-session";

/// Session lifetime: one week.
pub const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

/// The opaque value stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Token identifying `user`.
    pub fn for_user(user: &User) -> Self {
        Self(user.id.to_string())
    }

    /// Read the session cookie from request headers, if present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        cookie_value(headers, SESSION_COOKIE).map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Look the token up in the directory. Any parse failure yields `None`.
    pub fn resolve<'a>(&self, users: &'a UserDirectory) -> Option<&'a User> {
        match self.0.trim().parse::<DbId>() {
            Ok(id) => users.find_by_id(id),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed session cookie");
                None
            }
        }
    }

    /// `Set-Cookie` value establishing this session.
    pub fn to_cookie(&self, secure: bool) -> String {
        build_cookie(self.as_str(), SESSION_MAX_AGE_SECS, secure)
    }
}

/// Resolve a raw cookie value to a user.
pub fn resolve_session(cookie_value: &str, users: &UserDirectory) -> Option<User> {
    SessionToken::new(cookie_value).resolve(users).cloned()
}

/// `Set-Cookie` value that removes the session.
pub fn clear_session_cookie(secure: bool) -> String {
    build_cookie("", 0, secure)
}

fn build_cookie(value: &str, max_age: u64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Find a cookie by name across all `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn resolves_known_user() {
        let users = UserDirectory::seeded();
        let user = resolve_session("2", &users).unwrap();
        assert_eq!(user.email, "editor@test.com");
    }

    #[test]
    fn garbage_fails_open() {
        let users = UserDirectory::seeded();
        assert!(resolve_session("not-a-number", &users).is_none());
        assert!(resolve_session("", &users).is_none());
        assert!(resolve_session("99", &users).is_none());
    }

    #[test]
    fn reads_cookie_among_others() {
        let headers = headers_with("theme=dark; user-session=1; other=x");
        let token = SessionToken::from_headers(&headers).unwrap();
        assert_eq!(token.as_str(), "1");
    }

    #[test]
    fn missing_cookie_is_none() {
        let headers = headers_with("theme=dark");
        assert!(SessionToken::from_headers(&headers).is_none());
        assert!(SessionToken::from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn cookie_attributes() {
        let users = UserDirectory::seeded();
        let token = SessionToken::for_user(users.find_by_id(3).unwrap());
        let cookie = token.to_cookie(false);
        assert!(cookie.starts_with("user-session=3;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));
        assert!(token.to_cookie(true).ends_with("; Secure"));
    }

    #[test]
    fn clearing_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.starts_with("user-session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
