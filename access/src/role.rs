//! User roles and the canonical role → dashboard mapping.
//!
//! Every dispatch on role goes through an exhaustive `match` so adding a
//! variant fails to compile until each site is updated.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Principal category that determines which route subtrees a user may enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    ProjectManager,
    Developer,
    QaEngineer,
    Designer,
    Client,
}

/// Error returned when parsing an unrecognized role string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl Role {
    /// All roles, in menu/display order.
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::ProjectManager,
        Role::Developer,
        Role::QaEngineer,
        Role::Designer,
        Role::Client,
    ];

    /// Wire name (`snake_case`), matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProjectManager => "project_manager",
            Self::Developer => "developer",
            Self::QaEngineer => "qa_engineer",
            Self::Designer => "designer",
            Self::Client => "client",
        }
    }

    /// Human-readable label for headings and pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::ProjectManager => "Project Manager",
            Self::Developer => "Developer",
            Self::QaEngineer => "QA Engineer",
            Self::Designer => "Designer",
            Self::Client => "Client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts `snake_case` and `kebab-case`, ignoring case and outer whitespace.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| UnknownRole(raw.to_owned()))
    }
}

/// Canonical landing route for a role.
#[must_use]
pub fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/dashboard",
        Role::ProjectManager => "/project-manager/dashboard",
        Role::Developer => "/developer/dashboard",
        Role::QaEngineer => "/qa/dashboard",
        Role::Designer => "/designer/dashboard",
        Role::Client => "/client/dashboard",
    }
}

/// Landing route for a raw role string; unrecognized values land on the
/// developer dashboard.
#[must_use]
pub fn dashboard_path_for_raw(raw: &str) -> &'static str {
    dashboard_path(raw.parse().unwrap_or(Role::Developer))
}
