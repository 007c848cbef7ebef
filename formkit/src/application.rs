//! Moderation staff application payload.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client binds form inputs to [`ModerationApplication`] and posts it as
//! JSON; the server deserializes the same type, re-runs [`validate`], and
//! relays accepted applications. JSON keys are camelCase to match the form
//! field ids.
//!
//! Validation is limited to the markers the form already carries: the
//! acknowledgement checkbox, `required` inputs, the numeric age input, and
//! the fixed option sets of the radio groups.
//!
//! [`validate`]: ModerationApplication::validate

#[cfg(test)]
#[path = "application_test.rs"]
mod application_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Section holding the acknowledgement checkbox.
pub const INTRO_SECTION: usize = 0;
/// Section holding the general questions.
pub const QUESTIONS_SECTION: usize = 1;
/// Section holding the moderation scenarios.
pub const SCENARIOS_SECTION: usize = 2;

/// Allowed answers for the bot-experience scale, lowest first.
pub const BOT_EXPERIENCE_SCALE: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Error returned by [`ModerationApplication::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationError {
    #[error("please confirm you have read and understood the responsibilities of this role")]
    NotAcknowledged,
    #[error("missing answer: {}", .0.label())]
    MissingField(Field),
    #[error("age must be a whole number, got {0:?}")]
    InvalidAge(String),
    #[error("invalid choice {value:?} for {field}")]
    InvalidChoice { field: Field, value: String },
}

impl ApplicationError {
    /// Field the error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::NotAcknowledged => None,
            Self::MissingField(field) | Self::InvalidChoice { field, .. } => Some(*field),
            Self::InvalidAge(_) => Some(Field::Age),
        }
    }

    /// Form section that has to be shown to fix the error.
    #[must_use]
    pub fn section(&self) -> usize {
        self.field().map_or(INTRO_SECTION, Field::section)
    }
}

/// Text answers on the application, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Country,
    ContributionTime,
    Age,
    ModerationDefinition,
    PastExperience,
    VoiceChat,
    AboutYourself,
    ServerImprovement,
    ServiceDuration,
    StaffViolation,
    BotExperience,
    ArgumentScenario,
    OtherServerExperience,
    WhyQualified,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::Country,
        Field::ContributionTime,
        Field::Age,
        Field::ModerationDefinition,
        Field::PastExperience,
        Field::VoiceChat,
        Field::AboutYourself,
        Field::ServerImprovement,
        Field::ServiceDuration,
        Field::StaffViolation,
        Field::BotExperience,
        Field::ArgumentScenario,
        Field::OtherServerExperience,
        Field::WhyQualified,
    ];

    /// JSON key and DOM id.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::ContributionTime => "contributionTime",
            Self::Age => "age",
            Self::ModerationDefinition => "moderationDefinition",
            Self::PastExperience => "pastExperience",
            Self::VoiceChat => "voiceChat",
            Self::AboutYourself => "aboutYourself",
            Self::ServerImprovement => "serverImprovement",
            Self::ServiceDuration => "serviceDuration",
            Self::StaffViolation => "staffViolation",
            Self::BotExperience => "botExperience",
            Self::ArgumentScenario => "argumentScenario",
            Self::OtherServerExperience => "otherServerExperience",
            Self::WhyQualified => "whyQualified",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Question text as shown on the form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Country => "What country do you currently reside in?",
            Self::ContributionTime => "What is your suitable time to contribute to the server?",
            Self::Age => "What is your age?",
            Self::ModerationDefinition => {
                "Describe in your own words what it means to be a moderator and what moderation entails?"
            }
            Self::PastExperience => {
                "Please describe any past moderation or leadership experience you feel is relevant?"
            }
            Self::VoiceChat => "Are you able to regularly voice chat?",
            Self::AboutYourself => "Tell us about yourself, if you'd like!",
            Self::ServerImprovement => "What is something you would like to see improved within the server?",
            Self::ServiceDuration => {
                "For how long will you be able to provide service in moderation before taking any sort of major break or completely step down?"
            }
            Self::StaffViolation => {
                "If a staff member above you or alongside you, is violating the rules what do you do in that situation?"
            }
            Self::BotExperience => "How experienced are you with using Discord bots?",
            Self::ArgumentScenario => {
                "Two members are arguing in a public chatroom. What do you do? Please list all steps."
            }
            Self::OtherServerExperience => "What is your experience moderating other Discord servers?",
            Self::WhyQualified => "Why do you feel qualified for/want to be on the server moderation team?",
        }
    }

    /// Secondary help text under the question, if any.
    #[must_use]
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::VoiceChat => Some(
                "We regularly hold meetings through VC discussing moderation and often have our training sessions done via voice chat.",
            ),
            Self::ServerImprovement => {
                Some("This could be something in our rules, the channels, roles, bots etc.")
            }
            Self::OtherServerExperience => Some(
                "Include your level of authority (e.g. helper/mod/admin) and an approximate number of people on the server(s). Be sure to describe your activities as a moderator in detail. Please leave an invite to the server(s) in question if you can. Type \"none\" if you have no moderation experience on other discord servers",
            ),
            Self::WhyQualified => Some(
                "What makes you a good candidate for moderator overall? How much experience do you have with the game? What is motivating you to fill out this form right now?",
            ),
            _ => None,
        }
    }

    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Country => "e.g. India",
            Self::ContributionTime => "e.g. 8 PM - 11 PM IST",
            Self::Age => "e.g. 18",
            Self::AboutYourself => "Your answer (optional, but helps us know you better!)",
            Self::ServiceDuration => "e.g., 6 months, 1 year, indefinitely",
            Self::VoiceChat | Self::BotExperience => "",
            _ => "Your detailed answer",
        }
    }

    /// Whether the input carries the `required` marker.
    #[must_use]
    pub fn is_required(self) -> bool {
        !matches!(self, Self::AboutYourself)
    }

    /// Zero-based form section the question appears on.
    #[must_use]
    pub fn section(self) -> usize {
        match self {
            Self::StaffViolation
            | Self::BotExperience
            | Self::ArgumentScenario
            | Self::OtherServerExperience
            | Self::WhyQualified => SCENARIOS_SECTION,
            _ => QUESTIONS_SECTION,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Answer options for the voice chat question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceChat {
    Yes,
    No,
    ListenOnly,
}

impl VoiceChat {
    pub const ALL: [VoiceChat; 3] = [VoiceChat::Yes, VoiceChat::No, VoiceChat::ListenOnly];

    /// Submitted value.
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::ListenOnly => "listen-only",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::ListenOnly => "Listen in only (muted)",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.value() == value)
    }
}

/// Everything the applicant fills in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModerationApplication {
    pub understand: bool,
    pub country: String,
    pub contribution_time: String,
    pub age: String,
    pub moderation_definition: String,
    pub past_experience: String,
    pub voice_chat: String,
    pub about_yourself: String,
    pub server_improvement: String,
    pub service_duration: String,
    pub staff_violation: String,
    pub bot_experience: String,
    pub argument_scenario: String,
    pub other_server_experience: String,
    pub why_qualified: String,
}

impl ModerationApplication {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Country => &self.country,
            Field::ContributionTime => &self.contribution_time,
            Field::Age => &self.age,
            Field::ModerationDefinition => &self.moderation_definition,
            Field::PastExperience => &self.past_experience,
            Field::VoiceChat => &self.voice_chat,
            Field::AboutYourself => &self.about_yourself,
            Field::ServerImprovement => &self.server_improvement,
            Field::ServiceDuration => &self.service_duration,
            Field::StaffViolation => &self.staff_violation,
            Field::BotExperience => &self.bot_experience,
            Field::ArgumentScenario => &self.argument_scenario,
            Field::OtherServerExperience => &self.other_server_experience,
            Field::WhyQualified => &self.why_qualified,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Country => &mut self.country,
            Field::ContributionTime => &mut self.contribution_time,
            Field::Age => &mut self.age,
            Field::ModerationDefinition => &mut self.moderation_definition,
            Field::PastExperience => &mut self.past_experience,
            Field::VoiceChat => &mut self.voice_chat,
            Field::AboutYourself => &mut self.about_yourself,
            Field::ServerImprovement => &mut self.server_improvement,
            Field::ServiceDuration => &mut self.service_duration,
            Field::StaffViolation => &mut self.staff_violation,
            Field::BotExperience => &mut self.bot_experience,
            Field::ArgumentScenario => &mut self.argument_scenario,
            Field::OtherServerExperience => &mut self.other_server_experience,
            Field::WhyQualified => &mut self.why_qualified,
        };
        *slot = value.into();
    }

    /// Required fields that are blank, in form order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.get(*field).trim().is_empty())
            .collect()
    }

    /// Check the form markers, reporting the first problem in form order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApplicationError`] found, starting with the
    /// acknowledgement checkbox on the intro section.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !self.understand {
            return Err(ApplicationError::NotAcknowledged);
        }
        for field in Field::ALL {
            let value = self.get(field).trim();
            if value.is_empty() {
                if field.is_required() {
                    return Err(ApplicationError::MissingField(field));
                }
                continue;
            }
            match field {
                Field::Age if value.parse::<u32>().is_err() => {
                    return Err(ApplicationError::InvalidAge(value.to_owned()));
                }
                Field::VoiceChat if VoiceChat::from_value(value).is_none() => {
                    return Err(ApplicationError::InvalidChoice { field, value: value.to_owned() });
                }
                Field::BotExperience if !BOT_EXPERIENCE_SCALE.contains(&value) => {
                    return Err(ApplicationError::InvalidChoice { field, value: value.to_owned() });
                }
                _ => {}
            }
        }
        Ok(())
    }
}
