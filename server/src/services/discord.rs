//! Discord OAuth service: authorize URL, code exchange, profile fetch.

#[cfg(test)]
#[path = "discord_test.rs"]
mod discord_test;

use reqwest::Url;
use serde::Deserialize;

const AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";
const TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const CURRENT_USER_URL: &str = "https://discord.com/api/users/@me";
const AVATAR_CDN: &str = "https://cdn.discordapp.com/avatars";

/// Discord OAuth application credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl DiscordConfig {
    /// Read `DISCORD_CLIENT_ID`, `DISCORD_CLIENT_SECRET`, `DISCORD_REDIRECT_URI`.
    /// Returns `None` if any are missing (sign-in will be disabled).
    pub fn from_lookup<F>(lookup: &F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup("DISCORD_CLIENT_ID")?;
        let client_secret = lookup("DISCORD_CLIENT_SECRET")?;
        let redirect_uri = lookup("DISCORD_REDIRECT_URI")?;
        Some(Self { client_id, client_secret, redirect_uri })
    }

    /// Build the Discord authorization URL carrying the CSRF `state`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordError::Url`] if the parameters cannot be encoded.
    pub fn authorize_url(&self, state: &str) -> Result<String, DiscordError> {
        Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "identify"),
                ("state", state),
                ("prompt", "none"),
            ],
        )
        .map(String::from)
        .map_err(|e| DiscordError::Url(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiscordError {
    #[error("invalid discord url: {0}")]
    Url(String),
    #[error("discord token exchange failed: {0}")]
    TokenExchange(String),
    #[error("discord api error: {0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// The `/users/@me` payload, limited to what the form needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl DiscordUser {
    /// Global display name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// CDN URL of the user's avatar, if one is set.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_deref()
            .map(|hash| format!("{AVATAR_CDN}/{}/{hash}.png", self.id))
    }
}

/// Exchange an OAuth code for an access token.
///
/// # Errors
///
/// Returns [`DiscordError::TokenExchange`] on transport failure or an
/// unexpected response body.
pub async fn exchange_code(client: &reqwest::Client, config: &DiscordConfig, code: &str) -> Result<String, DiscordError> {
    let resp = client
        .post(TOKEN_URL)
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| DiscordError::TokenExchange(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| DiscordError::TokenExchange(e.to_string()))?;
    if !status.is_success() {
        return Err(DiscordError::TokenExchange(format!("{status}: {body}")));
    }
    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|_| DiscordError::TokenExchange(format!("unexpected response: {body}")))?;
    Ok(token.access_token)
}

/// Fetch the authenticated user's profile.
///
/// # Errors
///
/// Returns [`DiscordError::Api`] on transport failure or a non-2xx status.
pub async fn fetch_current_user(client: &reqwest::Client, access_token: &str) -> Result<DiscordUser, DiscordError> {
    let resp = client
        .get(CURRENT_USER_URL)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| DiscordError::Api(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(DiscordError::Api(format!("{status}: {body}")));
    }

    resp.json::<DiscordUser>()
        .await
        .map_err(|e| DiscordError::Api(e.to_string()))
}
