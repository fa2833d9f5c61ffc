//! Public landing page.

use access::{AuthState, dashboard_path};
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let dashboard = move || auth.with(|state| state.user().map(|user| dashboard_path(user.role)));

    view! {
        <div class="home-page">
            <h1>"WorkHub"</h1>
            <p class="home-page__tagline">"Projects, tasks, and time tracking for the whole team."</p>
            {move || match dashboard() {
                Some(path) => view! { <a class="home-page__cta" href=path>"Go to your dashboard"</a> }.into_any(),
                None => view! { <a class="home-page__cta" href="/auth">"Sign in"</a> }.into_any(),
            }}
        </div>
    }
}
