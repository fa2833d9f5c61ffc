//! Build-time client configuration.
//!
//! Values are baked in at compile time (`WORKHUB_API_BASE`,
//! `WORKHUB_REQUEST_TIMEOUT_MS`) since the WASM bundle has no process
//! environment at runtime.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 15_000;

/// Where and how the client reaches the REST collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the auth endpoint paths are appended to.
    pub api_base: String,
    /// Upper bound on any single auth request.
    pub request_timeout_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base: DEFAULT_API_BASE.to_owned(), request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS }
    }
}

impl ClientConfig {
    /// Read the compile-time environment.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::parse(option_env!("WORKHUB_API_BASE"), option_env!("WORKHUB_REQUEST_TIMEOUT_MS"))
    }

    /// Build from raw values, falling back to defaults for blank or invalid input.
    #[must_use]
    pub fn parse(api_base: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let api_base = api_base
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .map_or_else(|| DEFAULT_API_BASE.to_owned(), |base| base.trim_end_matches('/').to_owned());
        let request_timeout_ms = timeout_ms
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        Self { api_base, request_timeout_ms }
    }
}
