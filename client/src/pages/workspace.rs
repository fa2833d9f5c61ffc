//! Role workspace shell and section views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each role subtree renders `RoleWorkspace` inside its `ProtectedRoute`, so
//! by the time this runs the signed-in user holds the subtree's role.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use access::nav::find_item;
use access::{AuthState, Role};
use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::{use_location, use_params_map};

use crate::components::side_nav::SideNav;
use crate::state::auth::{AuthHandle, session_label};

/// Heading for a section slug: `test-cases` -> `Test Cases`.
fn section_title(section: &str) -> String {
    section
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn RoleWorkspace(role: Role) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let handle = use_context::<AuthHandle>();
    let label = move || auth.with(session_label).unwrap_or_default();

    let on_logout = move |_: leptos::ev::MouseEvent| {
        if let Some(context) = handle.and_then(|h| h.get()) {
            context.logout();
        }
    };

    view! {
        <div class="workspace">
            <header class="workspace__header">
                <span class="workspace__title">{format!("{} Workspace", role.label())}</span>
                <span class="workspace__user">{label}</span>
                <button class="workspace__logout" type="button" on:click=on_logout>
                    "Log out"
                </button>
            </header>
            <div class="workspace__body">
                <SideNav role=role/>
                <main class="workspace__content">
                    <Outlet/>
                </main>
            </div>
        </div>
    }
}

/// Content area for one menu section of the current role.
#[component]
pub fn SectionPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let location = use_location();

    let title = move || {
        let path = location.pathname.get();
        let known = auth.with(|state| state.user().and_then(|user| find_item(user.role, &path)).map(|item| item.label));
        known.map_or_else(|| section_title(&params.with(|p| p.get("section").unwrap_or_default())), str::to_owned)
    };

    view! {
        <section class="section-page">
            <h2>{title}</h2>
            <p class="section-page__empty">"Nothing here yet."</p>
        </section>
    }
}
