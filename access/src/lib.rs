//! Session, role, and route-authorization core for the workhub front end.
//!
//! This crate owns everything the UI needs to decide *who* is signed in and
//! *where* they may go. It has no browser or runtime dependency: storage,
//! HTTP transport, and navigation are injected through the [`Storage`],
//! [`AuthService`], and [`Navigator`] traits so the same state machine backs
//! the Leptos client and the CLI.
//!
//! SYSTEM CONTEXT
//! ==============
//! `store` persists the session, `service` defines the REST contract,
//! `context` is the single owner of auth state, and `guard` + `routes` turn
//! that state into render/redirect decisions.

pub mod context;
pub mod error;
pub mod guard;
pub mod nav;
pub mod role;
pub mod routes;
pub mod service;
pub mod session;
pub mod store;

pub use context::{AuthContext, AuthPhase, AuthState, Navigator};
pub use error::{AuthError, StorageError};
pub use guard::{GuardDecision, RouteRequirement, UnauthorizedNotice, decide};
pub use nav::{NavItem, menu_for};
pub use role::{Role, UnknownRole, dashboard_path, dashboard_path_for_raw};
pub use routes::{RoleRouteRule, RouteAccess, route_access};
pub use service::{AuthResponse, AuthService, Credentials, Endpoint, Registration};
pub use session::{Session, User};
pub use store::{MemoryStorage, SessionStore, Storage};
