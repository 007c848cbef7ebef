//! Status of the application submission.
//!
//! DESIGN
//! ======
//! One value drives the message under the form and the submit button's
//! disabled state. Validation failures and transport failures are kept
//! apart so the page can tell "fix your answers" from "try again later".

#[cfg(test)]
#[path = "submission_test.rs"]
mod submission_test;

pub const SUBMITTED_MESSAGE: &str = "Application submitted successfully!";
pub const FAILED_MESSAGE: &str = "Failed to submit application.";
pub const NETWORK_ERROR_MESSAGE: &str = "An error occurred while submitting the application.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
    /// Local validation rejected the answers.
    Invalid(String),
    /// The server rejected the request or could not be reached.
    Failed(String),
}

impl SubmissionStatus {
    /// A request is in flight or already accepted; further submits are ignored.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Submitting | Self::Submitted)
    }

    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Idle => None,
            Self::Submitting => Some("Submitting application...".to_owned()),
            Self::Submitted => Some(SUBMITTED_MESSAGE.to_owned()),
            Self::Invalid(reason) | Self::Failed(reason) => Some(reason.clone()),
        }
    }

    /// BEM modifier class for the status banner.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Idle | Self::Submitting => "form-status",
            Self::Submitted => "form-status form-status--ok",
            Self::Invalid(_) | Self::Failed(_) => "form-status form-status--error",
        }
    }
}
