//! Relay of accepted applications to the staff channel.
//!
//! DESIGN
//! ======
//! An application becomes one Discord embed field per question. Discord
//! caps field names at 256 chars, values at 1024, embeds at 25 fields and
//! a message's embeds at 6000 chars total, so long applications are split
//! into numbered parts rather than rejected. Titles are cut before the
//! part suffix is added so they stay within the 256-char title cap.
//!
//! Handlers only see [`ApplicationRelay`]; without a configured webhook URL
//! the server installs [`LogRelay`], which records the submission in the
//! log and accepts it.

#[cfg(test)]
#[path = "webhook_test.rs"]
mod tests;

use formkit::{Field, ModerationApplication, VoiceChat};
use serde::Serialize;
use tracing::info;

use super::session::SessionUser;

pub const FIELD_NAME_LIMIT: usize = 256;
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const FIELDS_PER_EMBED: usize = 25;
pub const MESSAGE_CHAR_LIMIT: usize = 6000;
pub const TITLE_LIMIT: usize = 256;

/// Room kept in every title for a ` (part N/M)` suffix.
const PART_SUFFIX_RESERVE: usize = 16;

const EMBED_COLOR: u32 = 0x00E6_7E22;
const NO_ANSWER: &str = "(no answer)";

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook request failed: {0}")]
    Request(String),
    #[error("webhook rejected message with status {0}")]
    Status(u16),
}

// =============================================================================
// MESSAGE SHAPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedThumbnail {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    fn new(title: String) -> Self {
        Self { title, color: EMBED_COLOR, description: None, thumbnail: None, fields: Vec::new() }
    }

    /// Characters Discord counts against the per-message budget.
    #[must_use]
    pub fn char_count(&self) -> usize {
        let head = self.title.chars().count() + self.description.as_deref().map_or(0, |d| d.chars().count());
        self.fields
            .iter()
            .fold(head, |n, f| n + f.name.chars().count() + f.value.chars().count())
    }
}

/// Body of one webhook POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookMessage {
    pub embeds: Vec<Embed>,
}

// =============================================================================
// RENDERING
// =============================================================================

/// Cut `s` to at most `max` chars, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn display_answer(field: Field, raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return NO_ANSWER.to_owned();
    }
    match field {
        Field::VoiceChat => VoiceChat::from_value(value).map_or_else(|| value.to_owned(), |c| c.label().to_owned()),
        Field::BotExperience => format!("{value} / 5"),
        _ => value.to_owned(),
    }
}

/// One embed field per question, in form order.
#[must_use]
pub fn application_fields(application: &ModerationApplication) -> Vec<EmbedField> {
    Field::ALL
        .into_iter()
        .map(|field| EmbedField {
            name: truncate(field.label(), FIELD_NAME_LIMIT),
            value: truncate(&display_answer(field, application.get(field)), FIELD_VALUE_LIMIT),
            inline: matches!(field, Field::Country | Field::Age | Field::VoiceChat | Field::BotExperience),
        })
        .collect()
}

/// Render an application into one or more webhook messages.
///
/// The first message carries the applicant header. When the application
/// needs more than one message, every title ends in ` (part N/M)`. Every
/// message stays within [`FIELDS_PER_EMBED`], [`TITLE_LIMIT`] and
/// [`MESSAGE_CHAR_LIMIT`].
#[must_use]
pub fn render_messages(applicant: &SessionUser, application: &ModerationApplication) -> Vec<WebhookMessage> {
    let base = truncate(
        &format!("Moderator application: {}", applicant.name),
        TITLE_LIMIT - PART_SUFFIX_RESERVE,
    );
    let mut first = Embed::new(base.clone());
    first.description = Some(format!("<@{}> (`{}`)", applicant.id, applicant.username));
    first.thumbnail = applicant
        .avatar_url
        .clone()
        .map(|url| EmbedThumbnail { url });

    let mut embeds = vec![first];
    for field in application_fields(application) {
        let field_chars = field.name.chars().count() + field.value.chars().count();
        let needs_new = embeds.last().is_some_and(|current| {
            current.fields.len() >= FIELDS_PER_EMBED
                || current.char_count() + field_chars + PART_SUFFIX_RESERVE > MESSAGE_CHAR_LIMIT
        });
        if needs_new {
            embeds.push(Embed::new(base.clone()));
        }
        if let Some(current) = embeds.last_mut() {
            current.fields.push(field);
        }
    }

    let total = embeds.len();
    if total > 1 {
        for (index, embed) in embeds.iter_mut().enumerate() {
            embed.title = truncate(&format!("{base} (part {}/{total})", index + 1), TITLE_LIMIT);
        }
    }

    embeds
        .into_iter()
        .map(|embed| WebhookMessage { embeds: vec![embed] })
        .collect()
}

// =============================================================================
// RELAYS
// =============================================================================

/// Destination for accepted applications. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ApplicationRelay: Send + Sync {
    /// Deliver an accepted application.
    ///
    /// # Errors
    ///
    /// Returns a [`WebhookError`] if the destination could not be reached or
    /// refused the message.
    async fn relay(&self, applicant: &SessionUser, application: &ModerationApplication) -> Result<(), WebhookError>;
}

/// Posts rendered messages to a Discord webhook URL.
///
/// Parts are posted in order and the relay stops at the first failure.
/// Parts already posted stay in the channel; a retry posts them again, and
/// their `(part N/M)` titles let moderators spot the repeats.
pub struct DiscordWebhook {
    client: reqwest::Client,
    url: String,
}

impl DiscordWebhook {
    #[must_use]
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait::async_trait]
impl ApplicationRelay for DiscordWebhook {
    async fn relay(&self, applicant: &SessionUser, application: &ModerationApplication) -> Result<(), WebhookError> {
        let messages = render_messages(applicant, application);
        let total = messages.len();
        for (index, message) in messages.iter().enumerate() {
            let resp = self
                .client
                .post(&self.url)
                .json(message)
                .send()
                .await
                .map_err(|e| WebhookError::Request(e.to_string()))?;
            if !resp.status().is_success() {
                return Err(WebhookError::Status(resp.status().as_u16()));
            }
            tracing::debug!(user_id = %applicant.id, part = index + 1, total, "webhook message delivered");
        }
        Ok(())
    }
}

/// Accepts every application and writes it to the log.
pub struct LogRelay;

#[async_trait::async_trait]
impl ApplicationRelay for LogRelay {
    async fn relay(&self, applicant: &SessionUser, application: &ModerationApplication) -> Result<(), WebhookError> {
        let body = serde_json::to_string(application).unwrap_or_default();
        info!(user_id = %applicant.id, username = %applicant.username, %body, "application received (no webhook configured)");
        Ok(())
    }
}
