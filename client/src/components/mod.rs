//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the application card chrome and bind inputs to the
//! form state owned by the page.

pub mod multi_step_form;
pub mod question;
pub mod user_card;
