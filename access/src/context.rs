//! Auth context: the single owner of session state.
//!
//! ARCHITECTURE
//! ============
//! `Uninitialized → Loading → {Authenticated, Anonymous}`. Startup is
//! two-phase: the stored token is read synchronously, then confirmed
//! against `/auth/me`; the fetched user always replaces any cached copy.
//! Token and user move together because `Authenticated` carries a whole
//! [`Session`].
//!
//! Every mutation goes through a named operation here. UI code observes
//! state through the optional observer callback (a Leptos signal in the
//! browser) and never writes storage directly.
//!
//! The context is single-threaded: state lives in a `RefCell`
//! that is never borrowed across an `.await`.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::cell::RefCell;

use crate::error::AuthError;
use crate::role::dashboard_path;
use crate::routes::{AUTH_PATH, post_login_path};
use crate::service::{AuthService, Credentials, Registration};
use crate::session::{Session, User};
use crate::store::{SessionStore, Storage};

/// Lifecycle phase of the current browser context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Nothing read yet.
    #[default]
    Uninitialized,
    /// A request that decides the session is in flight.
    Loading,
    Authenticated(Session),
    Anonymous,
}

/// Snapshot exposed to the UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub phase: AuthPhase,
    /// User-facing message from the last failed operation.
    pub error: Option<String>,
    /// Set once the session has been decided either way; never cleared.
    pub resolved: bool,
}

impl AuthState {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            AuthPhase::Authenticated(session) => Some(session),
            AuthPhase::Uninitialized | AuthPhase::Loading | AuthPhase::Anonymous => None,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session().map(|session| &session.user)
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session().map(|session| session.token.as_str())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// True while any auth request is in flight, or before startup.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, AuthPhase::Uninitialized | AuthPhase::Loading)
    }

    /// True until the startup check has decided the session. A login or
    /// register in flight after that does not count.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        match self.phase {
            AuthPhase::Uninitialized => true,
            AuthPhase::Loading => !self.resolved,
            AuthPhase::Authenticated(_) | AuthPhase::Anonymous => false,
        }
    }
}

/// Side effect of moving the user to another route.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, path: &str) {
        self(path);
    }
}

type Observer = Box<dyn Fn(&AuthState)>;

/// Owner of auth state and the only writer of the session store.
pub struct AuthContext<A, S, N> {
    service: A,
    store: SessionStore<S>,
    navigator: N,
    state: RefCell<AuthState>,
    observer: Option<Observer>,
}

impl<A, S, N> AuthContext<A, S, N>
where
    A: AuthService,
    S: Storage,
    N: Navigator,
{
    pub fn new(service: A, store: SessionStore<S>, navigator: N) -> Self {
        Self { service, store, navigator, state: RefCell::new(AuthState::default()), observer: None }
    }

    /// Register a callback that receives every committed state.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&AuthState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Current state snapshot.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Seed state from storage and confirm the stored token with the backend.
    ///
    /// Runs once; later calls are ignored.
    pub async fn initialize(&self) {
        if self.state.borrow().phase != AuthPhase::Uninitialized {
            tracing::debug!("auth context already initialized");
            return;
        }

        let Some(token) = self.store.read_token() else {
            tracing::debug!("no stored token; starting anonymous");
            self.commit(AuthPhase::Anonymous, None);
            return;
        };

        self.commit(AuthPhase::Loading, None);
        match self.service.current_user(&token).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "session restored");
                let session = Session::new(token, user);
                self.store.write(&session);
                self.commit(AuthPhase::Authenticated(session), None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored session rejected; clearing");
                self.store.clear();
                self.commit(AuthPhase::Anonymous, None);
            }
        }
    }

    /// Sign in and navigate to the user's dashboard.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] from validation or the service; the same
    /// message is recorded in [`AuthState::error`].
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.login_with_return(email, password, None).await
    }

    /// Sign in and navigate to `return_to` when the user's role permits it,
    /// otherwise to the dashboard.
    ///
    /// # Errors
    ///
    /// See [`AuthContext::login`].
    pub async fn login_with_return(
        &self,
        email: &str,
        password: &str,
        return_to: Option<&str>,
    ) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(self.reject(AuthError::Validation("Email and password are required.".to_owned())));
        }

        let previous = self.begin_loading();
        let credentials = Credentials::new(email, password);
        match self.service.login(&credentials).await {
            Ok(response) => Ok(self.establish(Session::new(response.token, response.user), return_to)),
            Err(e) => {
                tracing::info!(error = %e, "login failed");
                Err(self.fail(previous, e))
            }
        }
    }

    /// Create an account, sign in, and navigate to the new user's dashboard.
    ///
    /// # Errors
    ///
    /// [`AuthError::Validation`] without any request when the terms were not
    /// accepted or client fields are missing; otherwise the service error.
    pub async fn register(&self, registration: &Registration, agreed_to_terms: bool) -> Result<User, AuthError> {
        if !agreed_to_terms {
            return Err(self.reject(AuthError::Validation(
                "You must agree to the terms and conditions.".to_owned(),
            )));
        }
        if let Err(e) = registration.validate() {
            return Err(self.reject(e));
        }

        let previous = self.begin_loading();
        match self.service.register(registration).await {
            Ok(response) => Ok(self.establish(Session::new(response.token, response.user), None)),
            Err(e) => {
                tracing::info!(error = %e, "registration failed");
                Err(self.fail(previous, e))
            }
        }
    }

    /// Drop the session everywhere and return to the sign-in page.
    pub fn logout(&self) {
        if let Some(session) = self.state.borrow().session() {
            tracing::info!(user_id = %session.user.id, role = %session.user.role, "logging out");
        }
        self.store.clear();
        self.commit(AuthPhase::Anonymous, None);
        self.navigator.navigate(AUTH_PATH);
    }

    /// Re-fetch the current user. Any failure logs the user out.
    ///
    /// A role change reported by the backend also counts as failure: a new
    /// role requires a new login.
    pub async fn refresh_session(&self) -> bool {
        let (token, known_role) = {
            let state = self.state.borrow();
            match state.session() {
                Some(session) => (Some(session.token.clone()), Some(session.user.role)),
                None => (None, None),
            }
        };
        let Some(token) = token.or_else(|| self.store.read_token()) else {
            tracing::debug!("refresh requested without a token");
            self.logout();
            return false;
        };

        match self.service.current_user(&token).await {
            Ok(user) if known_role.is_some_and(|role| role != user.role) => {
                tracing::warn!(from = ?known_role, to = %user.role, "role changed server-side; forcing re-login");
                self.logout();
                false
            }
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "session refreshed");
                let session = Session::new(token, user);
                self.store.write(&session);
                self.commit(AuthPhase::Authenticated(session), None);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "session refresh failed; logging out");
                self.logout();
                false
            }
        }
    }

    /// Replace the signed-in user wholesale (profile update).
    ///
    /// # Errors
    ///
    /// [`AuthError::Unauthenticated`] with no session;
    /// [`AuthError::Validation`] when `user` is a different principal or role.
    pub fn replace_user(&self, user: User) -> Result<(), AuthError> {
        let token = {
            let state = self.state.borrow();
            let Some(session) = state.session() else {
                return Err(AuthError::Unauthenticated("Not signed in.".to_owned()));
            };
            if session.user.id != user.id || session.user.role != user.role {
                return Err(AuthError::Validation(
                    "Profile updates cannot change the user or role.".to_owned(),
                ));
            }
            session.token.clone()
        };
        let session = Session::new(token, user);
        self.store.write(&session);
        self.commit(AuthPhase::Authenticated(session), None);
        Ok(())
    }

    fn begin_loading(&self) -> AuthPhase {
        let previous = self.state.borrow().phase.clone();
        self.commit(AuthPhase::Loading, None);
        previous
    }

    fn establish(&self, session: Session, return_to: Option<&str>) -> User {
        tracing::info!(user_id = %session.user.id, role = %session.user.role, "signed in");
        let target = match return_to {
            Some(_) => post_login_path(&session.user, return_to),
            None => dashboard_path(session.user.role).to_owned(),
        };
        let user = session.user.clone();
        self.store.write(&session);
        self.commit(AuthPhase::Authenticated(session), None);
        self.navigator.navigate(&target);
        user
    }

    /// Record a failure from an in-flight request. An existing session
    /// survives a failed attempt; anything else settles as anonymous.
    fn fail(&self, previous: AuthPhase, error: AuthError) -> AuthError {
        let phase = match previous {
            AuthPhase::Authenticated(session) => AuthPhase::Authenticated(session),
            AuthPhase::Uninitialized | AuthPhase::Loading | AuthPhase::Anonymous => AuthPhase::Anonymous,
        };
        self.commit(phase, Some(error.to_string()));
        error
    }

    /// Record a local rejection without touching the phase.
    fn reject(&self, error: AuthError) -> AuthError {
        let phase = self.state.borrow().phase.clone();
        self.commit(phase, Some(error.to_string()));
        error
    }

    fn commit(&self, phase: AuthPhase, error: Option<String>) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            state.phase = phase;
            state.error = error;
            state.resolved |= matches!(state.phase, AuthPhase::Authenticated(_) | AuthPhase::Anonymous);
            state.clone()
        };
        if let Some(observer) = &self.observer {
            observer(&snapshot);
        }
    }
}
