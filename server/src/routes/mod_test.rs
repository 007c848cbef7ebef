use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::{RecordingRelay, complete_application, test_app_state, test_user};

fn app() -> (Router, AppState) {
    let state = test_app_state(Arc::new(RecordingRelay::default()));
    (api_routes(state.clone()), state)
}

#[tokio::test]
async fn healthz_is_ok() {
    let (router, _) = app();
    let resp = router
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_without_cookie_is_unauthorized() {
    let (router, _) = app();
    let resp = router
        .oneshot(Request::get("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn submit_without_session_is_unauthorized() {
    let (router, _) = app();
    let body = serde_json::to_string(&complete_application()).unwrap();
    let req = Request::post("/api/forms/moderation")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn submit_with_session_is_accepted() {
    let (router, state) = app();
    let token = state.sessions.create(test_user()).await;
    let body = serde_json::to_string(&complete_application()).unwrap();
    let req = Request::post("/api/forms/moderation")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, format!("session_token={token}"))
        .body(Body::from(body))
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_with_session_returns_user_json() {
    let (router, state) = app();
    let token = state.sessions.create(test_user()).await;
    let req = Request::get("/api/auth/me")
        .header(header::COOKIE, format!("session_token={token}"))
        .body(Body::empty())
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["username"], "nelly");
    assert_eq!(json["avatar_url"], serde_json::Value::Null);
}
