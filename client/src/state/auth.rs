//! Browser wiring for the auth context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides a `RwSignal<AuthState>` that every view reads. The
//! `AuthContext` that writes it is not `Send` (it owns a `RefCell` and a
//! router callback), so it lives in a local `StoredValue` behind the `Copy`
//! [`AuthHandle`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use access::{AuthContext, AuthState, SessionStore};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::net::api::HttpAuthService;
use crate::util::storage::BrowserStorage;

/// The concrete auth context used in the browser.
pub type ClientAuth = AuthContext<HttpAuthService, BrowserStorage, Box<dyn Fn(&str)>>;

/// Copyable handle to the page's [`ClientAuth`].
#[derive(Clone, Copy)]
pub struct AuthHandle(StoredValue<Rc<ClientAuth>, LocalStorage>);

impl AuthHandle {
    /// The context, or `None` once the owning scope has been disposed.
    pub fn get(&self) -> Option<Rc<ClientAuth>> {
        self.0.try_get_value()
    }
}

/// Fetch the auth context from the component tree.
pub fn use_auth() -> Option<Rc<ClientAuth>> {
    use_context::<AuthHandle>().and_then(|handle| handle.get())
}

/// Short "name (Role)" label for the signed-in user.
pub fn session_label(state: &AuthState) -> Option<String> {
    state.user().map(|user| {
        let name = if user.name.trim().is_empty() { user.email.as_str() } else { user.name.as_str() };
        format!("{name} ({})", user.role.label())
    })
}

/// Builds the auth context and runs startup revalidation once.
///
/// Must sit inside `<Router>` so navigation is available.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let navigator: Box<dyn Fn(&str)> = Box::new(move |path: &str| navigate(path, NavigateOptions::default()));

    let context = AuthContext::new(
        HttpAuthService::new(ClientConfig::from_build_env()),
        SessionStore::new(BrowserStorage),
        navigator,
    )
    .with_observer(move |next: &AuthState| auth.set(next.clone()));
    let handle = AuthHandle(StoredValue::new_local(Rc::new(context)));
    provide_context(handle);

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if let Some(context) = handle.get() {
            leptos::task::spawn_local(async move {
                context.initialize().await;
            });
        }
    });

    children()
}
