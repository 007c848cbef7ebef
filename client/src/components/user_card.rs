//! Signed-in user chip shown on the first form section.

use leptos::prelude::*;

use crate::net::types::User;
use crate::util::auth::LOGIN_PATH;

/// Avatar, display name, and Discord id, plus a sign-out link.
#[component]
pub fn UserCard(user: User) -> impl IntoView {
    let alt = user.name.clone();
    let on_sign_out = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            crate::util::browser::hard_redirect(LOGIN_PATH);
        });
    };

    view! {
        <div class="user-card">
            {user.avatar_url.map(|src| view! { <img class="user-card__avatar" src=src alt=alt width="32" height="32"/> })}
            <div class="user-card__identity">
                <p class="user-card__name">{user.name}</p>
                <p class="user-card__id">{user.id}</p>
            </div>
            <a href=LOGIN_PATH class="user-card__sign-out" on:click=on_sign_out>
                "Sign out"
            </a>
        </div>
    }
}
