//! Error taxonomy for auth flows and session persistence.
//!
//! ERROR HANDLING
//! ==============
//! `Display` on [`AuthError`] is the user-facing message: the auth context
//! stores it verbatim in `AuthState::error` for forms to render. A role
//! mismatch is not an error at all; it is a [`crate::GuardDecision`].

/// Failure of a login, registration, or session revalidation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the email/password pair.
    #[error("{0}")]
    InvalidCredentials(String),
    /// The token is missing, invalid, or expired.
    #[error("{0}")]
    Unauthenticated(String),
    /// Transport failure or timeout; the request never produced a response.
    #[error("Unable to reach the server: {0}")]
    Network(String),
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),
    /// Any other non-2xx response.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    /// Whether the failure means the current session can no longer be trusted.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }
}

/// Failure of the underlying key/value storage medium.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage is not reachable in this environment (SSR, private mode).
    #[error("storage unavailable")]
    Unavailable,
    /// The write was refused (quota, permissions, I/O).
    #[error("storage write failed: {0}")]
    Write(String),
}
