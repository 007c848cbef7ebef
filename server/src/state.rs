//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the parsed config, the session store, the submission limiter,
//! the application relay, and one shared HTTP client for Discord calls.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::rate_limit::SubmissionLimiter;
use crate::services::session::SessionStore;
use crate::services::webhook::{ApplicationRelay, DiscordWebhook, LogRelay};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; every field is Arc-backed or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
    pub limiter: SubmissionLimiter,
    pub relay: Arc<dyn ApplicationRelay>,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state from config, choosing the webhook relay when a URL is set.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let http = reqwest::Client::new();
        let relay: Arc<dyn ApplicationRelay> = match &config.webhook_url {
            Some(url) => Arc::new(DiscordWebhook::new(http.clone(), url.clone())),
            None => Arc::new(LogRelay),
        };
        Self::with_relay(config, http, relay)
    }

    #[must_use]
    pub fn with_relay(config: AppConfig, http: reqwest::Client, relay: Arc<dyn ApplicationRelay>) -> Self {
        Self {
            sessions: SessionStore::new(config.session_ttl),
            limiter: SubmissionLimiter::new(config.submission_limit, config.submission_window),
            config: Arc::new(config),
            relay,
            http,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
