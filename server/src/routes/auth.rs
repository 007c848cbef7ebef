//! Auth routes: Discord OAuth flow and session cookie management.

use axum::extract::{FromRef, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::services::discord;
use crate::services::session::{self, SessionUser};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";
const LOGIN_PATH: &str = "/login";
const AFTER_LOGIN_PATH: &str = "/";

fn build_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = build_cookie(name, String::new(), secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = app_state
            .sessions
            .validate(token)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /auth/discord`: redirect to the Discord authorization page.
pub async fn discord_redirect(State(state): State<AppState>) -> Response {
    let Some(config) = &state.config.discord else {
        return (StatusCode::SERVICE_UNAVAILABLE, "Discord sign-in not configured").into_response();
    };

    let oauth_state = session::generate_token();
    let url = match config.authorize_url(&oauth_state) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, "discord authorize url failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to start sign-in").into_response();
        }
    };

    let mut cookie = build_cookie(OAUTH_STATE_COOKIE_NAME, oauth_state, state.config.cookie_secure);
    cookie.set_max_age(Duration::minutes(10));
    (CookieJar::new().add(cookie), Redirect::temporary(&url)).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// `GET /auth/discord/callback`: exchange code, create session, set cookie.
pub async fn discord_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let Some(config) = &state.config.discord else {
        return (StatusCode::SERVICE_UNAVAILABLE, "Discord sign-in not configured").into_response();
    };
    let secure = state.config.cookie_secure;

    // The user declined, or `prompt=none` could not be satisfied.
    if let Some(error) = params.error.as_deref() {
        tracing::info!(%error, "discord authorization declined");
        let jar = jar.add(expired_cookie(OAUTH_STATE_COOKIE_NAME, secure));
        return (jar, Redirect::temporary(LOGIN_PATH)).into_response();
    }

    // Verify OAuth CSRF state from cookie.
    let Some(callback_state) = params.state.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing oauth state").into_response();
    };
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(Cookie::value)
        .unwrap_or_default();
    if expected_state.is_empty() || expected_state != callback_state {
        return (StatusCode::UNAUTHORIZED, "invalid oauth state").into_response();
    }
    let Some(code) = params.code.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing authorization code").into_response();
    };

    let access_token = match discord::exchange_code(&state.http, config, code).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "oauth code exchange failed");
            return (StatusCode::BAD_GATEWAY, "OAuth code exchange failed").into_response();
        }
    };

    let discord_user = match discord::fetch_current_user(&state.http, &access_token).await {
        Ok(u) => u,
        Err(e) => {
            tracing::error!(error = %e, "discord user fetch failed");
            return (StatusCode::BAD_GATEWAY, "Failed to fetch Discord profile").into_response();
        }
    };

    let user = SessionUser::from(discord_user);
    tracing::info!(user_id = %user.id, username = %user.username, "user signed in");
    let token = state.sessions.create(user).await;

    let mut session_cookie = build_cookie(COOKIE_NAME, token, secure);
    session_cookie.set_max_age(Duration::seconds(i64::try_from(state.sessions.ttl().as_secs()).unwrap_or(i64::MAX)));
    let jar = jar
        .add(session_cookie)
        .add(expired_cookie(OAUTH_STATE_COOKIE_NAME, secure));
    (jar, Redirect::temporary(AFTER_LOGIN_PATH)).into_response()
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: delete session if any, clear cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value) {
        state.sessions.delete(token).await;
    }
    let jar = jar.add(expired_cookie(COOKIE_NAME, state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
