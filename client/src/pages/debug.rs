//! Session inspector for troubleshooting sign-in problems.
//!
//! Public route; shows what the auth context and storage currently hold and
//! lets the user force a session refresh. A failed refresh signs the user
//! out and navigates to the auth page, so only success is reported here.

#[cfg(test)]
#[path = "debug_test.rs"]
mod debug_test;

use access::{AuthPhase, AuthState};
use leptos::prelude::*;

use crate::state::auth::AuthHandle;

fn phase_name(phase: &AuthPhase) -> &'static str {
    match phase {
        AuthPhase::Uninitialized => "uninitialized",
        AuthPhase::Loading => "loading",
        AuthPhase::Authenticated(_) => "authenticated",
        AuthPhase::Anonymous => "anonymous",
    }
}

/// Message shown after a refresh; failure has already left this page.
fn refresh_message(refreshed: bool) -> Option<&'static str> {
    refreshed.then_some("Session refreshed.")
}

/// Show only the ends of a token.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[component]
pub fn DebugPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let handle = use_context::<AuthHandle>();
    let refreshing = RwSignal::new(false);
    let outcome = RwSignal::new(None::<bool>);

    let phase = move || auth.with(|state| phase_name(&state.phase));
    let token = move || auth.with(|state| state.token().map_or_else(|| "(none)".to_owned(), mask_token));
    let user_json = move || {
        auth.with(|state| {
            state
                .user()
                .and_then(|user| serde_json::to_string_pretty(user).ok())
                .unwrap_or_else(|| "(none)".to_owned())
        })
    };
    let error = move || auth.with(|state| state.error.clone().unwrap_or_else(|| "(none)".to_owned()));
    let stored_token = move || {
        auth.track();
        handle
            .and_then(|h| h.get())
            .and_then(|context| context.store().read_token())
            .map_or_else(|| "(none)".to_owned(), |t| mask_token(&t))
    };

    let on_refresh = move |_: leptos::ev::MouseEvent| {
        if refreshing.get_untracked() {
            return;
        }

        #[cfg(feature = "hydrate")]
        if let Some(context) = handle.and_then(|h| h.get()) {
            refreshing.set(true);
            outcome.set(None);
            leptos::task::spawn_local(async move {
                let ok = context.refresh_session().await;
                outcome.set(Some(ok));
                refreshing.set(false);
            });
        }
    };

    view! {
        <div class="debug-page">
            <h1>"Session debug"</h1>
            <dl class="debug-page__state">
                <dt>"Phase"</dt>
                <dd>{phase}</dd>
                <dt>"Token"</dt>
                <dd>{token}</dd>
                <dt>"Stored token"</dt>
                <dd>{stored_token}</dd>
                <dt>"Last error"</dt>
                <dd>{error}</dd>
                <dt>"User"</dt>
                <dd>
                    <pre>{user_json}</pre>
                </dd>
            </dl>
            <button type="button" on:click=on_refresh disabled=move || refreshing.get()>
                "Refresh session"
            </button>
            {move || {
                outcome
                    .get()
                    .and_then(refresh_message)
                    .map(|message| view! { <p class="debug-page__outcome">{message}</p> })
            }}
        </div>
    }
}
