//! Server-side services: identity, sessions, and application relay.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routes stay thin; Discord API calls, the session store, and webhook
//! delivery live here so they can be tested without an HTTP stack.

pub mod discord;
pub mod session;
pub mod webhook;
