//! Authenticated principal and the token/user pairing that forms a session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::role::Role;

/// The authenticated principal as returned by `/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier. Numeric ids are normalized to strings.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, alias = "contact_number", skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    /// Client account identifier, when the backend distinguishes it from `id`.
    #[serde(default, alias = "client_id", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// A bearer token paired with the user it authenticates.
///
/// Token and user only exist together; an absent session is `Option::None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    #[must_use]
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self { token: token.into(), user }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Identifier persisted under the client-scoped storage key.
    ///
    /// Only client sessions carry one.
    #[must_use]
    pub fn client_scope_id(&self) -> Option<&str> {
        match self.user.role {
            Role::Client => Some(self.user.client_id.as_deref().unwrap_or(&self.user.id)),
            Role::Admin | Role::ProjectManager | Role::Developer | Role::QaEngineer | Role::Designer => None,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) if !id.is_empty() => Ok(id),
        serde_json::Value::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        other => Err(D::Error::custom(format!("expected string or integer id, got {other}"))),
    }
}
