//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the HTTP calls and `types` defines the JSON schema shared
//! with the server routes.

pub mod api;
pub mod types;
