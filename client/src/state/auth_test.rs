use super::*;
use access::{AuthPhase, Role, Session, User};

fn state_for(name: &str, role: Role) -> AuthState {
    let user = User {
        id: "7".to_owned(),
        email: "sam@example.com".to_owned(),
        name: name.to_owned(),
        role,
        company: None,
        contact_number: None,
        client_id: None,
    };
    AuthState { phase: AuthPhase::Authenticated(Session::new("tok", user)), error: None, resolved: true }
}

#[test]
fn session_label_uses_name_and_role_label() {
    let state = state_for("Sam Park", Role::QaEngineer);
    assert_eq!(session_label(&state).as_deref(), Some("Sam Park (QA Engineer)"));
}

#[test]
fn session_label_falls_back_to_email() {
    let state = state_for("  ", Role::Client);
    assert_eq!(session_label(&state).as_deref(), Some("sam@example.com (Client)"));
}

#[test]
fn session_label_is_none_when_signed_out() {
    assert_eq!(session_label(&AuthState::default()), None);
}
