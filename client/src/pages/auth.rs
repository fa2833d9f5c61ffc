//! Sign-in and registration page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guest-only route. Both forms hand their input to the auth context; errors
//! come back through `AuthState::error` and success navigates away. A
//! `from` query parameter set by the route guard is passed through as the
//! post-login destination.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use access::service::Registration;
use access::{AuthState, Role};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::state::auth::AuthHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

/// Raw registration inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RegisterForm {
    name: String,
    email: String,
    password: String,
    role: Role,
    company: String,
    contact_number: String,
}

impl RegisterForm {
    /// Client-only fields are attached only for client accounts.
    fn to_registration(&self) -> Registration {
        let registration = Registration::new(self.name.trim(), self.email.trim(), self.password.clone(), self.role);
        match self.role {
            Role::Client => registration
                .with_field("company", self.company.trim())
                .with_field("contactNumber", self.contact_number.trim()),
            Role::Admin | Role::ProjectManager | Role::Developer | Role::QaEngineer | Role::Designer => registration,
        }
    }
}

/// `from` query value worth returning to.
fn return_to(from: Option<String>) -> Option<String> {
    from.filter(|path| !path.trim().is_empty())
}

fn tab_class(active: bool) -> &'static str {
    if active { "auth-tab auth-tab--active" } else { "auth-tab" }
}

/// Role picker value; anything unrecognized selects developer.
fn role_choice(raw: &str) -> Role {
    raw.parse().unwrap_or(Role::Developer)
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let handle = use_context::<AuthHandle>();
    let query = use_query_map();

    let mode = RwSignal::new(Mode::Login);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Developer);
    let company = RwSignal::new(String::new());
    let contact_number = RwSignal::new(String::new());
    let agreed = RwSignal::new(false);

    let busy = Memo::new(move |_| auth.with(AuthState::is_loading));
    let error = move || auth.with(|state| state.error.clone());

    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        let from = return_to(query.with_untracked(|q| q.get("from")));

        #[cfg(feature = "hydrate")]
        if let Some(context) = handle.and_then(|h| h.get()) {
            leptos::task::spawn_local(async move {
                let _ = context.login_with_return(&email_value, &password_value, from.as_deref()).await;
            });
        }
    };

    let on_register = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = RegisterForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            role: role.get_untracked(),
            company: company.get_untracked(),
            contact_number: contact_number.get_untracked(),
        };
        let terms = agreed.get_untracked();

        #[cfg(feature = "hydrate")]
        if let Some(context) = handle.and_then(|h| h.get()) {
            leptos::task::spawn_local(async move {
                let _ = context.register(&form.to_registration(), terms).await;
            });
        }
    };

    let email_input = move || {
        view! {
            <input
                class="auth-input"
                type="email"
                placeholder="you@example.com"
                autocomplete="email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
        }
    };
    let password_input = move || {
        view! {
            <input
                class="auth-input"
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"WorkHub"</h1>
                <div class="auth-tabs">
                    <button
                        type="button"
                        class=move || tab_class(mode.get() == Mode::Login)
                        on:click=move |_| mode.set(Mode::Login)
                    >
                        "Sign in"
                    </button>
                    <button
                        type="button"
                        class=move || tab_class(mode.get() == Mode::Register)
                        on:click=move |_| mode.set(Mode::Register)
                    >
                        "Create account"
                    </button>
                </div>

                <Show
                    when=move || mode.get() == Mode::Login
                    fallback=move || {
                        view! {
                            <form class="auth-form" on:submit=on_register>
                                <input
                                    class="auth-input"
                                    type="text"
                                    placeholder="Full name"
                                    prop:value=move || name.get()
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                />
                                {email_input()}
                                {password_input()}
                                <select
                                    class="auth-input"
                                    on:change=move |ev| role.set(role_choice(&event_target_value(&ev)))
                                >
                                    {Role::ALL
                                        .into_iter()
                                        .map(|option| {
                                            let value = option.as_str();
                                            view! {
                                                <option value=value selected=move || role.get() == option>
                                                    {option.label()}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                                <Show when=move || role.get() == Role::Client>
                                    <input
                                        class="auth-input"
                                        type="text"
                                        placeholder="Company"
                                        prop:value=move || company.get()
                                        on:input=move |ev| company.set(event_target_value(&ev))
                                    />
                                    <input
                                        class="auth-input"
                                        type="tel"
                                        placeholder="Contact number"
                                        prop:value=move || contact_number.get()
                                        on:input=move |ev| contact_number.set(event_target_value(&ev))
                                    />
                                </Show>
                                <label class="auth-terms">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || agreed.get()
                                        on:change=move |ev| agreed.set(event_target_checked(&ev))
                                    />
                                    "I agree to the terms and conditions"
                                </label>
                                <button class="auth-button" type="submit" disabled=move || busy.get()>
                                    {move || if busy.get() { "Creating account..." } else { "Create account" }}
                                </button>
                            </form>
                        }
                    }
                >
                    <form class="auth-form" on:submit=on_login>
                        {email_input()}
                        {password_input()}
                        <button class="auth-button" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                    </form>
                </Show>

                <Show when=move || error().is_some()>
                    <p class="auth-message auth-message--error" role="alert">
                        {move || error().unwrap_or_default()}
                    </p>
                </Show>
            </div>
        </div>
    }
}
