pub mod auth;
pub mod debug;
pub mod home;
pub mod not_found;
pub mod unauthorized;
pub mod workspace;
