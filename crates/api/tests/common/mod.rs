//! Shared helpers for API integration tests.
//!
//! Every [`TestContext`] gets its own temporary directory holding the page
//! file and the upload directory, so tests never share state.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use wikimasters_api::config::{ServerConfig, StorageBackend};
use wikimasters_api::router::build_app_router;
use wikimasters_api::session::SESSION_COOKIE;
use wikimasters_api::state::AppState;
use wikimasters_db::{FilePageStore, SharedPageStore, UserDirectory};

pub const ADMIN: i64 = 1;
pub const EDITOR: i64 = 2;
pub const VIEWER: i64 = 3;

const BOUNDARY: &str = "wikimasters-test-boundary";

/// Build a test `ServerConfig` rooted at `dir`.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::File {
            path: dir.join("pages.json"),
        },
        cache_ttl: None,
        upload_dir: dir.join("uploads"),
        cookie_secure: false,
    }
}

/// An application backed by a seeded page file in a temporary directory.
pub struct TestContext {
    dir: TempDir,
    pub store: SharedPageStore,
    app: Router,
}

impl TestContext {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let state = AppState::from_config(config).await.unwrap();
        let store = state.store.clone();
        Self {
            dir,
            store,
            app: build_app_router(state),
        }
    }

    /// A context whose page file starts out empty.
    pub async fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let StorageBackend::File { path } = &config.storage else {
            unreachable!("test config always uses the file backend");
        };
        let store: SharedPageStore =
            std::sync::Arc::new(FilePageStore::with_pages(path, &[]).await.unwrap());
        let state = AppState::new(store.clone(), UserDirectory::seeded(), config);
        Self {
            dir,
            store,
            app: build_app_router(state),
        }
    }

    pub fn app(&self) -> Router {
        self.app.clone()
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }
}

/// `Cookie` header value carrying a session for `user_id`.
pub fn session_cookie(user_id: i64) -> String {
    format!("{SESSION_COOKIE}={user_id}")
}

fn request(method: Method, uri: &str, user: Option<i64>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match user {
        Some(id) => builder.header(COOKIE, session_cookie(id)),
        None => builder,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Anonymous GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_as(app, uri, None).await
}

pub async fn get_as(app: Router, uri: &str, user: Option<i64>) -> Response<Body> {
    let req = request(Method::GET, uri, user).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn post_json(app: Router, uri: &str, body: Value, user: Option<i64>) -> Response<Body> {
    json_request(app, Method::POST, uri, body, user).await
}

pub async fn put_json(app: Router, uri: &str, body: Value, user: Option<i64>) -> Response<Body> {
    json_request(app, Method::PUT, uri, body, user).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: Value,
    user: Option<i64>,
) -> Response<Body> {
    let req = request(method, uri, user)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

/// POST a raw body with the given content type.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
    user: Option<i64>,
) -> Response<Body> {
    let req = request(Method::POST, uri, user)
        .header(CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap();
    send(app, req).await
}

pub async fn delete(app: Router, uri: &str, user: Option<i64>) -> Response<Body> {
    let req = request(Method::DELETE, uri, user).body(Body::empty()).unwrap();
    send(app, req).await
}

/// POST a multipart form with a single file field.
pub async fn post_file(
    app: Router,
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
    user: Option<i64>,
) -> Response<Body> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    post_raw(
        app,
        "/api/upload",
        &format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
        user,
    )
    .await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
