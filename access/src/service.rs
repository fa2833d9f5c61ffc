//! REST contract for login, registration, and "who am I".
//!
//! The transport lives with each front end (`gloo-net` in the browser,
//! `reqwest` in the CLI); this module owns the request/response shapes and
//! the status → [`AuthError`] mapping so every transport fails the same way.
//!
//! Services never persist anything and never retry. They return data for
//! the auth context to commit.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AuthError;
use crate::role::Role;
use crate::session::User;

/// Message reported when a request exceeds its deadline.
pub const TIMEOUT_MESSAGE: &str = "request timed out";

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

/// Body of `POST /auth/register`.
///
/// `fields` carries role-specific extras (`company`, `contactNumber`, ...)
/// and is flattened into the JSON body untouched.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Registration {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
            fields: Map::new(),
        }
    }

    /// Attach a role-specific field.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_owned(), value.into());
        self
    }

    /// Client accounts must name a company and a contact number.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] when a required client field is
    /// missing or blank.
    pub fn validate(&self) -> Result<(), AuthError> {
        match self.role {
            Role::Client => {
                let present = |key: &str| {
                    self.fields
                        .get(key)
                        .and_then(Value::as_str)
                        .is_some_and(|v| !v.trim().is_empty())
                };
                if present("company") && present("contactNumber") {
                    Ok(())
                } else {
                    Err(AuthError::Validation(
                        "Company and contact number are required for client accounts.".to_owned(),
                    ))
                }
            }
            Role::Admin | Role::ProjectManager | Role::Developer | Role::QaEngineer | Role::Designer => Ok(()),
        }
    }
}

/// Successful login/registration payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// The three auth endpoints of the REST collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    Me,
}

impl Endpoint {
    /// Path relative to the API base.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Register => "/auth/register",
            Self::Me => "/auth/me",
        }
    }

    /// Join this endpoint onto `base` without doubling or dropping slashes.
    #[must_use]
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }

    fn default_failure_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed. Please check your credentials.",
            Self::Register => "Registration failed. Please try again.",
            Self::Me => "Your session has expired. Please sign in again.",
        }
    }
}

/// Transport-agnostic auth backend.
#[async_trait(?Send)]
pub trait AuthService {
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the backend rejects the pair,
    /// [`AuthError::Network`] on transport failure or timeout.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError>;

    /// # Errors
    ///
    /// Same failure modes as [`AuthService::login`].
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, AuthError>;

    /// # Errors
    ///
    /// [`AuthError::Unauthenticated`] when `token` is invalid or expired.
    async fn current_user(&self, token: &str) -> Result<User, AuthError>;
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map a non-2xx response from `endpoint` to an [`AuthError`].
#[must_use]
pub fn error_for_status(endpoint: Endpoint, status: u16, body: &str) -> AuthError {
    let message = extract_error_message(body).unwrap_or_else(|| endpoint.default_failure_message().to_owned());
    match (endpoint, status) {
        (Endpoint::Me, 401 | 403) => AuthError::Unauthenticated(message),
        (Endpoint::Login, 400 | 401 | 403) => AuthError::InvalidCredentials(message),
        _ => AuthError::Rejected { status, message },
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at JSON `message`, `error`, then `detail`; falls back to the raw
/// body when it is short plain text.
#[must_use]
pub fn extract_error_message(body: &str) -> Option<String> {
    const MAX_PLAIN_LEN: usize = 200;

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        return ["message", "error", "detail"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|msg| !msg.is_empty())
            .map(str::to_owned);
    }
    if trimmed.starts_with('<') || trimmed.len() > MAX_PLAIN_LEN {
        return None;
    }
    Some(trimmed.to_owned())
}

/// Decode a 2xx body, mapping shape mismatches to [`AuthError::InvalidResponse`].
///
/// # Errors
///
/// Returns [`AuthError::InvalidResponse`] when `body` is not a valid `T`.
pub fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, AuthError> {
    serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse(e.to_string()))
}
