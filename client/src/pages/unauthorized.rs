//! Shown when a signed-in user opens another role's route.
//!
//! The guard passes the notice through the query string, so the page also
//! renders sensibly on a reload or a pasted link.

use access::guard::UnauthorizedNotice;
use access::{AuthState, dashboard_path};
use leptos::prelude::*;
use leptos_router::hooks::use_location;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let notice = Memo::new(move |_| UnauthorizedNotice::from_query(&location.search.get()));

    let message = move || {
        let notice = notice.get();
        if notice.required.is_empty() { "You do not have access to this page.".to_owned() } else { notice.message }
    };
    let current = move || notice.get().current_role.map(|role| format!("Signed in as: {}", role.label()));
    let home = move || auth.with(|state| state.user().map_or("/", |user| dashboard_path(user.role)));

    view! {
        <div class="status-page status-page--unauthorized">
            <h1>"Access denied"</h1>
            <p class="status-page__message">{message}</p>
            <p class="status-page__role">{current}</p>
            <a href=home>"Return to your dashboard"</a>
        </div>
    }
}
