//! Shared form model for the staff application.
//!
//! This crate owns the pieces used by both `server` and `client`: the
//! multi-step controller that pages through form sections, and the
//! moderation application payload with its required-field checks.
//! Nothing here touches the DOM or the network.

pub mod application;
pub mod step;

pub use application::{ApplicationError, Field, ModerationApplication, VoiceChat};
pub use step::{NavigationState, StepChange, StepController, StepError};
