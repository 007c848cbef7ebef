//! Server configuration parsed from environment variables.
//!
//! `main` loads `.env` through `dotenvy` first, so every key below can live
//! in either place. Parsing goes through a lookup function so tests can feed
//! values without touching the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::services::discord::DiscordConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;
pub const DEFAULT_SUBMISSION_LIMIT: usize = 3;
pub const DEFAULT_SUBMISSION_WINDOW_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// `None` disables Discord sign-in.
    pub discord: Option<DiscordConfig>,
    /// Discord webhook receiving accepted applications. `None` logs them instead.
    pub webhook_url: Option<String>,
    pub cookie_secure: bool,
    pub session_ttl: Duration,
    pub submission_limit: usize,
    pub submission_window: Duration,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DISCORD_CLIENT_ID`, `DISCORD_CLIENT_SECRET`, `DISCORD_REDIRECT_URI`: all or nothing
    /// - `APPLICATION_WEBHOOK_URL`
    /// - `COOKIE_SECURE`: default true when the redirect URI is https
    /// - `SESSION_TTL_SECS`: default 7 days
    /// - `SUBMISSION_LIMIT`, `SUBMISSION_WINDOW_SECS`: default 3 per 24h
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a present value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an explicit key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a present value does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord = DiscordConfig::from_lookup(&lookup);
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
            None => discord
                .as_ref()
                .is_some_and(|d| d.redirect_uri.starts_with("https://")),
        };
        let webhook_url = lookup("APPLICATION_WEBHOOK_URL")
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            discord,
            webhook_url,
            cookie_secure,
            session_ttl: Duration::from_secs(parse_or(&lookup, "SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?),
            submission_limit: parse_or(&lookup, "SUBMISSION_LIMIT", DEFAULT_SUBMISSION_LIMIT)?,
            submission_window: Duration::from_secs(parse_or(
                &lookup,
                "SUBMISSION_WINDOW_SECS",
                DEFAULT_SUBMISSION_WINDOW_SECS,
            )?),
        })
    }
}

/// Accepts `1/true/yes/on` and `0/false/no/off`, case-insensitive.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
