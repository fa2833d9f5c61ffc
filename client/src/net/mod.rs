//! Networking for the REST auth collaborator.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements `access::AuthService` over `fetch`; the request/response
//! shapes and status mapping live in `access::service`.

pub mod api;
