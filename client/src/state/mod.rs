//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern so pages depend on small focused models:
//! `auth` for the signed-in Discord user and `submission` for the status
//! of the application POST. Field values live in
//! `formkit::ModerationApplication`.

pub mod auth;
pub mod submission;
