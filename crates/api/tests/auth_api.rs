//! Integration tests for login, logout and the session user.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{body_json, get, get_as, post_json, TestContext, ADMIN, EDITOR, VIEWER};
use serde_json::json;

#[tokio::test]
async fn login_sets_session_cookie() {
    let ctx = TestContext::new().await;
    let response = post_json(
        ctx.app(),
        "/api/auth/login",
        json!({"email": "editor@test.com"}),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("user-session=2;"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], 2);
    assert_eq!(json["user"]["name"], "Editor User");
    assert_eq!(json["user"]["role"], "editor");
}

#[tokio::test]
async fn login_with_unknown_email_returns_401() {
    let ctx = TestContext::new().await;
    let response = post_json(
        ctx.app(),
        "/api/auth/login",
        json!({"email": "nobody@test.com"}),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn login_with_malformed_email_returns_400() {
    let ctx = TestContext::new().await;

    for body in [json!({"email": "not-an-email"}), json!({})] {
        let response = post_json(ctx.app(), "/api/auth/login", body, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn logout_clears_cookie() {
    let ctx = TestContext::new().await;
    let response = post_json(ctx.app(), "/api/auth/logout", json!({}), Some(ADMIN)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("user-session=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await, json!({"success": true}));
}

#[tokio::test]
async fn me_reports_capabilities_per_role() {
    let ctx = TestContext::new().await;

    let cases = [
        (Some(ADMIN), true, true),
        (Some(EDITOR), true, false),
        (Some(VIEWER), false, false),
    ];
    for (user, can_edit, can_delete) in cases {
        let json = body_json(get_as(ctx.app(), "/api/auth/me", user).await).await;
        assert_eq!(json["user"]["id"], user.unwrap());
        assert_eq!(json["canEdit"], can_edit);
        assert_eq!(json["canDelete"], can_delete);
    }
}

#[tokio::test]
async fn me_without_session_is_null_user() {
    let ctx = TestContext::new().await;
    let response = get(ctx.app(), "/api/auth/me").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["user"].is_null());
    assert_eq!(json["canEdit"], false);
    assert_eq!(json["canDelete"], false);
}

#[tokio::test]
async fn unknown_user_id_in_cookie_is_anonymous() {
    let ctx = TestContext::new().await;
    let json = body_json(get_as(ctx.app(), "/api/auth/me", Some(99)).await).await;
    assert!(json["user"].is_null());
}
