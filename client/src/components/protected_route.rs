//! Route guard component.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps a route's view and renders whatever `access::guard::decide` says
//! for the current auth state and location: a placeholder while the session
//! is being resolved, the children, or a replacing redirect.

#[cfg(test)]
#[path = "protected_route_test.rs"]
mod protected_route_test;

use access::guard::{GuardDecision, RouteRequirement, decide};
use access::{AuthState, Role};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

/// Path plus query as the guard and the `from` parameter expect it.
fn full_location(pathname: &str, search: &str) -> String {
    let query = search.trim_start_matches('?');
    if query.is_empty() { pathname.to_owned() } else { format!("{pathname}?{query}") }
}

#[component]
pub fn ProtectedRoute(
    /// Roles admitted; empty admits any signed-in user.
    #[prop(optional)]
    allowed_roles: Vec<Role>,
    /// `false` marks a guest-only route such as the sign-in page.
    #[prop(default = true)]
    require_auth: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let requirement = RouteRequirement { require_auth, allowed_roles };

    let decision = Memo::new(move |_| {
        let here = full_location(&location.pathname.get(), &location.search.get());
        decide(&auth.get(), &requirement, &here)
    });

    move || match decision.get() {
        GuardDecision::Loading => view! {
            <div class="route-loading" aria-busy="true">"Loading..."</div>
        }
        .into_any(),
        GuardDecision::Render => children().into_any(),
        other => {
            let Some(target) = other.redirect_target() else {
                return ().into_any();
            };
            tracing::debug!(%target, "route guard redirect");
            view! { <Redirect path=target options=NavigateOptions { replace: true, ..NavigateOptions::default() }/> }
                .into_any()
        }
    }
}
