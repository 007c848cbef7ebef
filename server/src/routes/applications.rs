//! Staff application submission routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use formkit::{ApplicationError, ModerationApplication};
use serde::Serialize;

use crate::rate_limit::RateLimitError;
use crate::routes::auth::AuthUser;
use crate::state::AppState;

const RELAY_FAILED_MESSAGE: &str = "Could not deliver the application to the staff team. Please try again later.";

/// JSON body of every submission response.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SubmitResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Key of the offending field, so the form can jump to its section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    /// Form section holding the problem, present on every validation failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<usize>,
}

impl SubmitResponse {
    fn accepted() -> Self {
        Self { ok: true, error: None, field: None, section: None }
    }

    fn rejected(error: impl Into<String>) -> Self {
        Self { ok: false, error: Some(error.into()), field: None, section: None }
    }
}

fn reply(status: StatusCode, body: SubmitResponse) -> Response {
    (status, Json(body)).into_response()
}

pub(crate) fn invalid_response(err: &ApplicationError) -> Response {
    let body = SubmitResponse {
        field: err.field().map(formkit::Field::key),
        section: Some(err.section()),
        ..SubmitResponse::rejected(err.to_string())
    };
    reply(StatusCode::UNPROCESSABLE_ENTITY, body)
}

pub(crate) fn rate_limited_response(err: &RateLimitError) -> Response {
    reply(StatusCode::TOO_MANY_REQUESTS, SubmitResponse::rejected(err.to_string()))
}

/// `POST /api/forms/moderation`: validate, rate-limit, and relay an application.
pub async fn submit_moderation(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(application): Json<ModerationApplication>,
) -> Response {
    let user_id = auth.user.id.as_str();

    if let Err(e) = application.validate() {
        tracing::info!(%user_id, error = %e, "application rejected");
        return invalid_response(&e);
    }

    let reservation = match state.limiter.reserve(user_id) {
        Ok(reservation) => reservation,
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "application rate limited");
            return rate_limited_response(&e);
        }
    };

    if let Err(e) = state.relay.relay(&auth.user, &application).await {
        tracing::error!(%user_id, error = %e, "application relay failed");
        state.limiter.release(reservation);
        return reply(StatusCode::BAD_GATEWAY, SubmitResponse::rejected(RELAY_FAILED_MESSAGE));
    }

    tracing::info!(%user_id, username = %auth.user.username, "application submitted");
    reply(StatusCode::OK, SubmitResponse::accepted())
}

#[cfg(test)]
#[path = "applications_test.rs"]
mod tests;
