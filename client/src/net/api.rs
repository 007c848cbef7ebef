//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so auth and
//! submission failures degrade UI behavior without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use formkit::ModerationApplication;

use super::types::{SubmitFailure, User};

/// Endpoint the application form posts to.
pub const MODERATION_ENDPOINT: &str = "/api/forms/moderation";

#[cfg(any(test, feature = "hydrate"))]
fn submit_failed_message(status: u16) -> String {
    match status {
        401 => "Your session has expired. Please sign in again.".to_owned(),
        429 => "You have submitted too many applications. Please try again later.".to_owned(),
        _ => format!("{} (status {status})", crate::state::submission::FAILED_MESSAGE),
    }
}

/// Turn a non-OK response into a failure, preferring the server's reason.
#[cfg(any(test, feature = "hydrate"))]
fn failure_from_response(status: u16, body: Option<super::types::SubmitResponse>) -> SubmitFailure {
    let body = body.unwrap_or_default();
    let field = body.field.as_deref().and_then(formkit::Field::from_key);
    let message = body.error.unwrap_or_else(|| submit_failed_message(status));
    SubmitFailure { message, field, section: body.section }
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<User>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        if let Err(e) = gloo_net::http::Request::post("/api/auth/logout").send().await {
            log::warn!("logout request failed: {e}");
        }
    }
}

/// Post the application to [`MODERATION_ENDPOINT`].
///
/// # Errors
///
/// Returns a [`SubmitFailure`] when the request cannot be sent or the server
/// rejects it. Validation rejections carry the offending field.
pub async fn submit_moderation_application(application: &ModerationApplication) -> Result<(), SubmitFailure> {
    #[cfg(feature = "hydrate")]
    {
        use crate::state::submission::NETWORK_ERROR_MESSAGE;

        let request = gloo_net::http::Request::post(MODERATION_ENDPOINT)
            .json(application)
            .map_err(|e| {
                log::error!("encoding application failed: {e}");
                SubmitFailure::new(NETWORK_ERROR_MESSAGE)
            })?;
        let resp = request.send().await.map_err(|e| {
            log::error!("submission error: {e}");
            SubmitFailure::new(NETWORK_ERROR_MESSAGE)
        })?;
        if resp.ok() {
            return Ok(());
        }
        let status = resp.status();
        let body = resp.json::<super::types::SubmitResponse>().await.ok();
        let failure = failure_from_response(status, body);
        log::warn!("submission rejected ({status}): {}", failure.message);
        Err(failure)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = application;
        Err(SubmitFailure::new("not available on server"))
    }
}
