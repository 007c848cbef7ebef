use super::*;
use crate::net::types::User;

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&AuthState::loading()));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState {
        user: Some(User {
            id: "80351110224678912".to_owned(),
            name: "Alice".to_owned(),
            username: "alice".to_owned(),
            avatar_url: None,
        }),
        loading: false,
    };
    assert!(!should_redirect_unauth(&state));
}
