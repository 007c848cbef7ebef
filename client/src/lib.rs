//! # client
//!
//! Leptos + WASM frontend for the Among Us India staff application.
//!
//! Pages sit behind a Discord sign-in gate and render the moderation
//! application as a multi-step form. Paging is driven by
//! `formkit::StepController`; field values and the submit call stay with
//! the page.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger already set: {e}").into());
    }
    leptos::mount::hydrate_body(app::App);
}
