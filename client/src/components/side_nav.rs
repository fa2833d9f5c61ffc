//! Role-scoped side navigation.

use access::Role;
use access::nav::{find_item, menu_for};
use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Menu for `role`, highlighting the entry for the current path.
#[component]
pub fn SideNav(role: Role) -> impl IntoView {
    let location = use_location();
    let active = Memo::new(move |_| find_item(role, &location.pathname.get()).map(|item| item.path));

    view! {
        <nav class="side-nav" aria-label="Workspace">
            <ul class="side-nav__list">
                {menu_for(role)
                    .iter()
                    .map(|item| {
                        let path = item.path;
                        let is_active = move || active.get() == Some(path);
                        view! {
                            <li>
                                <a
                                    href=path
                                    class=move || {
                                        if is_active() { "side-nav__item side-nav__item--active" } else { "side-nav__item" }
                                    }
                                    aria-current=move || is_active().then_some("page")
                                >
                                    {item.label}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
