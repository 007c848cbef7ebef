//! Sign-in gate shown to visitors without a Discord session.

use leptos::prelude::*;

/// Server route that starts the Discord OAuth flow.
pub const DISCORD_SIGN_IN_PATH: &str = "/auth/discord";

/// Login page. The button leaves the SPA for the Discord OAuth redirect.
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="page page--centered">
            <div class="login-card">
                <h1 class="login-card__title">"Authentication Required"</h1>
                <p class="login-card__subtitle">
                    "Please sign in with Discord to access the staff application."
                </p>
                <a
                    href=DISCORD_SIGN_IN_PATH
                    rel="external"
                    class="button login-button"
                    on:click=move |ev| {
                        ev.prevent_default();
                        crate::util::browser::hard_redirect(DISCORD_SIGN_IN_PATH);
                    }
                >
                    "Sign In with Discord"
                </a>
            </div>
        </div>
    }
}
