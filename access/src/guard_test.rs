use super::*;
use crate::context::AuthPhase;
use crate::session::{Session, User};

fn signed_in(role: Role) -> AuthState {
    let user = User {
        id: "1".to_owned(),
        email: "u@example.com".to_owned(),
        name: "U".to_owned(),
        role,
        company: None,
        contact_number: None,
        client_id: None,
    };
    AuthState { phase: AuthPhase::Authenticated(Session::new("tok", user)), error: None, resolved: true }
}

fn anonymous() -> AuthState {
    AuthState { phase: AuthPhase::Anonymous, error: None, resolved: true }
}

#[test]
fn loading_states_never_redirect() {
    for phase in [AuthPhase::Uninitialized, AuthPhase::Loading] {
        let state = AuthState { phase, error: None, resolved: false };
        for requirement in [RouteRequirement::roles(&[Role::Admin]), RouteRequirement::guest_only()] {
            assert_eq!(decide(&state, &requirement, "/admin/dashboard"), GuardDecision::Loading);
        }
    }
}

#[test]
fn login_in_flight_keeps_guest_page_but_holds_protected_routes() {
    let state = AuthState { phase: AuthPhase::Loading, error: None, resolved: true };

    assert_eq!(decide(&state, &RouteRequirement::guest_only(), "/auth"), GuardDecision::Render);
    assert_eq!(
        decide(&state, &RouteRequirement::roles(&[Role::Admin]), "/admin/dashboard"),
        GuardDecision::Loading
    );
}

#[test]
fn anonymous_on_protected_route_redirects_to_auth_with_location() {
    let decision = decide(&anonymous(), &RouteRequirement::roles(&[Role::Admin]), "/admin/users");
    assert_eq!(decision, GuardDecision::RedirectToAuth { from: "/admin/users".to_owned() });
    assert_eq!(decision.redirect_target().as_deref(), Some("/auth?from=%2Fadmin%2Fusers"));
}

#[test]
fn anonymous_never_renders_protected_content() {
    let requirements = [RouteRequirement::authenticated(), RouteRequirement::roles(&Role::ALL)];
    for requirement in requirements {
        assert_ne!(decide(&anonymous(), &requirement, "/x"), GuardDecision::Render);
    }
}

#[test]
fn authenticated_on_guest_only_route_goes_to_dashboard() {
    let decision = decide(&signed_in(Role::Designer), &RouteRequirement::guest_only(), "/auth");
    assert_eq!(decision, GuardDecision::RedirectToDashboard { path: "/designer/dashboard" });
    assert_eq!(decision.redirect_target().as_deref(), Some("/designer/dashboard"));
}

#[test]
fn anonymous_on_guest_only_route_renders() {
    assert_eq!(decide(&anonymous(), &RouteRequirement::guest_only(), "/auth"), GuardDecision::Render);
}

#[test]
fn matching_role_renders() {
    let decision = decide(&signed_in(Role::Admin), &RouteRequirement::roles(&[Role::Admin]), "/admin");
    assert_eq!(decision, GuardDecision::Render);
}

#[test]
fn any_authenticated_user_passes_empty_role_set() {
    for role in Role::ALL {
        assert_eq!(
            decide(&signed_in(role), &RouteRequirement::authenticated(), "/shared"),
            GuardDecision::Render
        );
    }
}

#[test]
fn developer_on_admin_route_is_unauthorized_with_message() {
    let decision = decide(
        &signed_in(Role::Developer),
        &RouteRequirement::roles(&[Role::Admin]),
        "/admin/dashboard",
    );
    let GuardDecision::Unauthorized(notice) = &decision else {
        panic!("expected unauthorized, got {decision:?}");
    };
    assert_eq!(notice.message, "This page requires one of the following roles: admin");
    assert_eq!(notice.current_role, Some(Role::Developer));
    assert_eq!(notice.from, "/admin/dashboard");
    assert_eq!(
        decision.redirect_target().as_deref(),
        Some("/unauthorized?required=admin&current=developer&from=%2Fadmin%2Fdashboard")
    );
}

#[test]
fn message_lists_every_required_role() {
    assert_eq!(
        required_roles_message(&[Role::Admin, Role::ProjectManager]),
        "This page requires one of the following roles: admin, project_manager"
    );
}

#[test]
fn notice_query_reverses() {
    let notice = UnauthorizedNotice::new(&[Role::Admin, Role::QaEngineer], Some(Role::Client), "/qa/bugs?x=1");
    let rebuilt = UnauthorizedNotice::from_query(&format!("?{}", notice.to_query()));
    assert_eq!(rebuilt, notice);
}

#[test]
fn notice_from_garbage_query_is_still_readable() {
    let notice = UnauthorizedNotice::from_query("required=wizard,admin&current=ghost&junk=1");
    assert_eq!(notice.required, vec![Role::Admin]);
    assert_eq!(notice.current_role, None);
    assert_eq!(notice.from, "");
}

#[test]
fn requirement_for_location_follows_route_table() {
    assert_eq!(
        RouteRequirement::for_location("/client/invoices"),
        Some(RouteRequirement::roles(&[Role::Client]))
    );
    assert_eq!(RouteRequirement::for_location("/auth"), Some(RouteRequirement::guest_only()));
    assert_eq!(RouteRequirement::for_location("/debug"), None);
}

#[test]
fn auth_redirect_without_location_is_bare() {
    assert_eq!(auth_redirect(""), "/auth");
}
