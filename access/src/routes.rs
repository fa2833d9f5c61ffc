//! Route table: public routes, role-owned subtrees, and shared terminals.
//!
//! Each protected subtree has exactly one [`RoleRouteRule`]. Matching is on
//! path segments, so `/administrator` never falls under `/admin`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::role::{Role, dashboard_path};
use crate::session::User;

pub const HOME_PATH: &str = "/";
pub const AUTH_PATH: &str = "/auth";
pub const DEBUG_PATH: &str = "/debug";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const NOT_FOUND_PATH: &str = "/not-found";

/// Binding between a URL subtree and the roles allowed into it.
///
/// An empty `allowed_roles` admits any authenticated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleRouteRule {
    pub path_prefix: &'static str,
    pub allowed_roles: &'static [Role],
}

impl RoleRouteRule {
    #[must_use]
    pub fn admits(&self, role: Role) -> bool {
        self.allowed_roles.is_empty() || self.allowed_roles.contains(&role)
    }

    /// Whether `path` falls inside this rule's subtree.
    #[must_use]
    pub fn covers(&self, path: &str) -> bool {
        path.strip_prefix(self.path_prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// One rule per role-prefixed workspace.
pub static ROLE_RULES: [RoleRouteRule; 6] = [
    RoleRouteRule { path_prefix: "/admin", allowed_roles: &[Role::Admin] },
    RoleRouteRule { path_prefix: "/project-manager", allowed_roles: &[Role::ProjectManager] },
    RoleRouteRule { path_prefix: "/developer", allowed_roles: &[Role::Developer] },
    RoleRouteRule { path_prefix: "/qa", allowed_roles: &[Role::QaEngineer] },
    RoleRouteRule { path_prefix: "/designer", allowed_roles: &[Role::Designer] },
    RoleRouteRule { path_prefix: "/client", allowed_roles: &[Role::Client] },
];

/// The rule owning `role`'s workspace.
#[must_use]
pub fn workspace_rule(role: Role) -> &'static RoleRouteRule {
    let index = match role {
        Role::Admin => 0,
        Role::ProjectManager => 1,
        Role::Developer => 2,
        Role::QaEngineer => 3,
        Role::Designer => 4,
        Role::Client => 5,
    };
    &ROLE_RULES[index]
}

/// How a path is gated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone, signed in or not (`/`, `/debug`, shared terminals).
    Public,
    /// Only anonymous visitors; signed-in users bounce to their dashboard.
    GuestOnly,
    /// Inside a role-owned subtree.
    Protected(&'static RoleRouteRule),
    /// No route matches.
    NotFound,
}

/// Strip query string and fragment, and any trailing slash except the root.
#[must_use]
pub fn normalize_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

/// Classify `location` against the route table.
#[must_use]
pub fn route_access(location: &str) -> RouteAccess {
    let path = normalize_path(location);
    match path {
        "" | HOME_PATH | DEBUG_PATH | UNAUTHORIZED_PATH | NOT_FOUND_PATH => RouteAccess::Public,
        AUTH_PATH => RouteAccess::GuestOnly,
        _ => ROLE_RULES
            .iter()
            .find(|rule| rule.covers(path))
            .map_or(RouteAccess::NotFound, RouteAccess::Protected),
    }
}

/// Where to send `user` after signing in.
///
/// `return_to` wins only when it is a same-origin path the user may enter;
/// otherwise the role's dashboard is used.
#[must_use]
pub fn post_login_path(user: &User, return_to: Option<&str>) -> String {
    let fallback = dashboard_path(user.role);
    let Some(target) = return_to.map(str::trim) else {
        return fallback.to_owned();
    };
    if !target.starts_with('/') || target.starts_with("//") || target.contains('\\') {
        return fallback.to_owned();
    }
    match route_access(target) {
        RouteAccess::Protected(rule) if rule.admits(user.role) => target.to_owned(),
        RouteAccess::Protected(_) | RouteAccess::Public | RouteAccess::GuestOnly | RouteAccess::NotFound => {
            fallback.to_owned()
        }
    }
}
