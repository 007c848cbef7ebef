//! Wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These mirror the server's JSON responses field for field so serde
//! round-trips stay lossless. The application payload itself is
//! `formkit::ModerationApplication`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use formkit::Field;
use serde::{Deserialize, Serialize};

/// The signed-in Discord user as returned by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Discord user id (snowflake string).
    pub id: String,
    /// Display name (global name, falling back to the username).
    pub name: String,
    /// Discord username.
    pub username: String,
    /// Avatar image URL, if the user has one.
    pub avatar_url: Option<String>,
}

/// Body of `POST /api/forms/moderation` responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    /// JSON key of the offending field on validation failures.
    #[serde(default)]
    pub field: Option<String>,
    /// Form section holding the problem on validation failures.
    #[serde(default)]
    pub section: Option<usize>,
}

/// Why a submission did not go through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitFailure {
    pub message: String,
    pub field: Option<Field>,
    pub section: Option<usize>,
}

impl SubmitFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), field: None, section: None }
    }

    /// Form section to reveal. The server's section wins; otherwise it
    /// is derived from the field.
    #[must_use]
    pub fn section(&self) -> Option<usize> {
        self.section.or_else(|| self.field.map(Field::section))
    }
}
