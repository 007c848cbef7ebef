use std::sync::Arc;
use std::time::Duration;

use formkit::Field;

use super::*;
use crate::state::test_helpers::{RecordingRelay, complete_application, test_app_state, test_user};

fn auth() -> AuthUser {
    AuthUser { user: test_user() }
}

async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn valid_application_is_relayed() {
    let relay = Arc::new(RecordingRelay::default());
    let state = test_app_state(relay.clone());

    let resp = submit_moderation(State(state), auth(), Json(complete_application())).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!({ "ok": true }));

    let received = relay.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, test_user());
    assert_eq!(received[0].1, complete_application());
}

#[tokio::test]
async fn invalid_application_is_422_with_field() {
    let relay = Arc::new(RecordingRelay::default());
    let state = test_app_state(relay.clone());
    let mut application = complete_application();
    application.set(Field::WhyQualified, "");

    let resp = submit_moderation(State(state), auth(), Json(application)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["field"], "whyQualified");
    assert_eq!(body["section"], formkit::application::SCENARIOS_SECTION);
    assert!(body["error"].as_str().unwrap().starts_with("missing answer"));
    assert!(relay.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unacknowledged_application_has_no_field() {
    let state = test_app_state(Arc::new(RecordingRelay::default()));
    let application = ModerationApplication { understand: false, ..complete_application() };

    let resp = submit_moderation(State(state), auth(), Json(application)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert!(body.get("field").is_none());
    assert_eq!(body["section"], formkit::application::INTRO_SECTION);
}

#[tokio::test]
async fn submissions_over_limit_are_429() {
    let relay = Arc::new(RecordingRelay::default());
    let state = test_app_state(relay.clone());
    let limit = state.config.submission_limit;

    for _ in 0..limit {
        let resp = submit_moderation(State(state.clone()), auth(), Json(complete_application())).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = submit_moderation(State(state), auth(), Json(complete_application())).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(relay.received.lock().unwrap().len(), limit);
}

#[tokio::test]
async fn relay_failure_is_502_and_not_counted() {
    let relay = Arc::new(RecordingRelay { fail: true, ..RecordingRelay::default() });
    let state = test_app_state(relay);

    let resp = submit_moderation(State(state.clone()), auth(), Json(complete_application())).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(resp).await["ok"], false);

    // The failed attempt gave its slot back: the full quota is still free.
    for _ in 0..state.config.submission_limit {
        assert!(state.limiter.reserve(&test_user().id).is_ok());
    }
    assert!(state.limiter.reserve(&test_user().id).is_err());
}

#[tokio::test]
async fn concurrent_submissions_respect_limit() {
    let relay = Arc::new(RecordingRelay { delay: Some(Duration::from_millis(50)), ..RecordingRelay::default() });
    let state = test_app_state(relay.clone());
    let limit = state.config.submission_limit;

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move {
                submit_moderation(State(state), auth(), Json(complete_application()))
                    .await
                    .status()
            })
        })
        .collect();

    let mut accepted = 0;
    let mut limited = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::OK => accepted += 1,
            StatusCode::TOO_MANY_REQUESTS => limited += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(accepted, limit);
    assert_eq!(limited, 10 - limit);
    assert_eq!(relay.received.lock().unwrap().len(), limit);
}

#[tokio::test]
async fn concurrent_failed_relays_release_their_slots() {
    let relay = Arc::new(RecordingRelay {
        fail: true,
        delay: Some(Duration::from_millis(20)),
        ..RecordingRelay::default()
    });
    let state = test_app_state(relay);

    let tasks: Vec<_> = (0..5)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move {
                submit_moderation(State(state), auth(), Json(complete_application()))
                    .await
                    .status()
            })
        })
        .collect();
    for task in tasks {
        let status = task.await.unwrap();
        assert!(status == StatusCode::BAD_GATEWAY || status == StatusCode::TOO_MANY_REQUESTS);
    }
    assert!(state.limiter.reserve(&test_user().id).is_ok());
}

#[test]
fn submit_response_omits_empty_fields() {
    let json = serde_json::to_value(SubmitResponse::accepted()).unwrap();
    assert_eq!(json, serde_json::json!({ "ok": true }));
}
