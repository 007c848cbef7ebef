use super::*;

fn alice() -> User {
    User {
        id: "80351110224678912".to_owned(),
        name: "Alice".to_owned(),
        username: "alice".to_owned(),
        avatar_url: None,
    }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn auth_state_default_not_loading() {
    let state = AuthState::default();
    assert!(!state.loading);
}

#[test]
fn auth_state_loading_has_no_user() {
    let state = AuthState::loading();
    assert!(state.loading);
    assert!(state.user.is_none());
}

#[test]
fn auth_state_with_user_is_authenticated() {
    let state = AuthState { user: Some(alice()), loading: false };
    assert!(state.is_authenticated());
}
