//! # client
//!
//! Leptos + WASM front end for workhub.
//!
//! This crate renders the route tree, role workspaces, and the sign-in page.
//! Session and authorization decisions come from the `access` crate; this
//! crate supplies the browser pieces it needs (`localStorage`, `fetch`,
//! router navigation) and turns guard decisions into views.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
