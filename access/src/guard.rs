//! Route guard: turn auth state + route requirements into a render or
//! redirect decision.
//!
//! ORDERING
//! ========
//! 1. loading → placeholder, no redirect yet
//! 2. auth required, not signed in → `/auth?from=<location>`
//! 3. guest-only route, signed in → role dashboard
//! 4. role gate not satisfied → `/unauthorized` with an explanatory notice
//! 5. otherwise render
//!
//! Every branch resolves to a decision; inconsistent state falls through to
//! the sign-in redirect.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use url::form_urlencoded;

use crate::context::AuthState;
use crate::role::{Role, dashboard_path};
use crate::routes::{AUTH_PATH, DEBUG_PATH, RouteAccess, UNAUTHORIZED_PATH, route_access};

/// What a route demands of the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteRequirement {
    pub require_auth: bool,
    /// Empty means any authenticated user.
    pub allowed_roles: Vec<Role>,
}

impl RouteRequirement {
    /// Any signed-in user.
    #[must_use]
    pub fn authenticated() -> Self {
        Self { require_auth: true, allowed_roles: Vec::new() }
    }

    /// Signed-in users holding one of `roles`.
    #[must_use]
    pub fn roles(roles: &[Role]) -> Self {
        Self { require_auth: true, allowed_roles: roles.to_vec() }
    }

    /// Anonymous visitors only (the sign-in page).
    #[must_use]
    pub fn guest_only() -> Self {
        Self { require_auth: false, allowed_roles: Vec::new() }
    }

    /// Requirement implied by the route table for `location`, or `None`
    /// when the route is unguarded.
    #[must_use]
    pub fn for_location(location: &str) -> Option<Self> {
        match route_access(location) {
            RouteAccess::Protected(rule) => Some(Self::roles(rule.allowed_roles)),
            RouteAccess::GuestOnly => Some(Self::guest_only()),
            RouteAccess::Public | RouteAccess::NotFound => None,
        }
    }
}

/// Explanation carried to the unauthorized page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnauthorizedNotice {
    pub message: String,
    pub required: Vec<Role>,
    pub current_role: Option<Role>,
    /// Location the user attempted to open.
    pub from: String,
}

impl UnauthorizedNotice {
    #[must_use]
    pub fn new(required: &[Role], current_role: Option<Role>, from: &str) -> Self {
        Self {
            message: required_roles_message(required),
            required: required.to_vec(),
            current_role,
            from: from.to_owned(),
        }
    }

    /// Query string (without `?`) that [`UnauthorizedNotice::from_query`] reverses.
    #[must_use]
    pub fn to_query(&self) -> String {
        let required = join_roles(&self.required, ",");
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("required", &required);
        if let Some(role) = self.current_role {
            query.append_pair("current", role.as_str());
        }
        if !self.from.is_empty() {
            query.append_pair("from", &self.from);
        }
        query.finish()
    }

    /// Rebuild a notice from a query string. Unknown roles are dropped.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut required = Vec::new();
        let mut current_role = None;
        let mut from = String::new();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "required" => required.extend(value.split(',').filter_map(|raw| raw.parse::<Role>().ok())),
                "current" => current_role = value.parse().ok(),
                "from" => from = value.into_owned(),
                _ => {}
            }
        }
        Self::new(&required, current_role, &from)
    }
}

/// Outcome of a guard check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving; show a placeholder.
    Loading,
    /// Render the requested element.
    Render,
    /// Send to the sign-in page, remembering where the user was headed.
    RedirectToAuth { from: String },
    /// Signed-in user on a guest-only page.
    RedirectToDashboard { path: &'static str },
    /// Signed in, but the role may not enter this route.
    Unauthorized(UnauthorizedNotice),
}

impl GuardDecision {
    /// Concrete URL to navigate to, if the decision is a redirect.
    #[must_use]
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            Self::Loading | Self::Render => None,
            Self::RedirectToAuth { from } => Some(auth_redirect(from)),
            Self::RedirectToDashboard { path } => Some((*path).to_owned()),
            Self::Unauthorized(notice) => Some(format!("{UNAUTHORIZED_PATH}?{}", notice.to_query())),
        }
    }
}

/// Decide what to do with a navigation to `location`.
#[must_use]
pub fn decide(state: &AuthState, requirement: &RouteRequirement, location: &str) -> GuardDecision {
    // Guest-only pages stay mounted while their own login is in flight.
    if state.is_resolving() || (state.is_loading() && requirement.require_auth) {
        return GuardDecision::Loading;
    }

    if requirement.require_auth && !state.is_authenticated() {
        return GuardDecision::RedirectToAuth { from: location.to_owned() };
    }

    if !requirement.require_auth && state.is_authenticated() {
        let path = state.user().map_or(DEBUG_PATH, |user| dashboard_path(user.role));
        return GuardDecision::RedirectToDashboard { path };
    }

    if !requirement.allowed_roles.is_empty() {
        return match state.user() {
            Some(user) if requirement.allowed_roles.contains(&user.role) => GuardDecision::Render,
            Some(user) => {
                tracing::debug!(role = %user.role, location, "role not permitted for route");
                GuardDecision::Unauthorized(UnauthorizedNotice::new(
                    &requirement.allowed_roles,
                    Some(user.role),
                    location,
                ))
            }
            None => GuardDecision::RedirectToAuth { from: location.to_owned() },
        };
    }

    GuardDecision::Render
}

/// `/auth` URL that returns to `from` after sign-in.
#[must_use]
pub fn auth_redirect(from: &str) -> String {
    if from.is_empty() {
        return AUTH_PATH.to_owned();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("from", from)
        .finish();
    format!("{AUTH_PATH}?{query}")
}

/// "This page requires one of the following roles: a, b"
#[must_use]
pub fn required_roles_message(required: &[Role]) -> String {
    format!("This page requires one of the following roles: {}", join_roles(required, ", "))
}

fn join_roles(roles: &[Role], separator: &str) -> String {
    roles.iter().map(|role| role.as_str()).collect::<Vec<_>>().join(separator)
}
