//! `/api/*` reverse proxy to the REST backend.
//!
//! The browser talks to one origin; this forwards auth calls (and anything
//! else under `/api`) to `API_BASE_URL` with the caller's bearer token.
//! Failures come back as JSON `{ "message": ... }` so the client's error
//! extraction reads them like backend errors.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::ServerConfig;

/// Request bodies larger than this are refused.
const MAX_BODY_BYTES: usize = 1024 * 1024;
const API_PREFIX: &str = "/api";
static FORWARDED_HEADERS: [HeaderName; 3] = [AUTHORIZATION, CONTENT_TYPE, ACCEPT];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProxyError {
    #[error("API backend is not configured")]
    NotConfigured,
    #[error("request body rejected: {0}")]
    Body(String),
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream unreachable: {0}")]
    Upstream(String),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() { Self::Timeout } else { Self::Upstream(error.to_string()) }
    }
}

#[derive(Clone, Debug)]
pub struct ProxyState {
    http: reqwest::Client,
    upstream: Option<String>,
}

impl ProxyState {
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.proxy_timeout).build()?;
        Ok(Self { http, upstream: config.api_base_url.clone() })
    }
}

/// Upstream URL for a proxied path: `/api/auth/me?x=1` -> `{base}/auth/me?x=1`.
fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let rest = path.strip_prefix(API_PREFIX).unwrap_or(path);
    let mut url = format!("{}/{}", base.trim_end_matches('/'), rest.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

pub async fn forward(State(proxy): State<ProxyState>, request: Request) -> Result<Response, ProxyError> {
    let Some(base) = proxy.upstream.as_deref() else {
        return Err(ProxyError::NotConfigured);
    };
    let (parts, body) = request.into_parts();
    let url = upstream_url(base, parts.uri.path(), parts.uri.query());
    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    let mut upstream = proxy.http.request(parts.method.clone(), &url);
    for name in &FORWARDED_HEADERS {
        if let Some(value) = parts.headers.get(name) {
            upstream = upstream.header(name, value);
        }
    }
    if !body.is_empty() {
        upstream = upstream.body(body);
    }

    let response = upstream.send().await.map_err(|e| {
        tracing::warn!(method = %parts.method, %url, error = %e, "proxy request failed");
        ProxyError::from(e)
    })?;
    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let bytes = response.bytes().await?;
    tracing::debug!(method = %parts.method, %url, status = status.as_u16(), "proxied");

    let mut reply = Response::builder().status(status);
    if let Some(content_type) = content_type {
        reply = reply.header(CONTENT_TYPE, content_type);
    }
    reply
        .body(Body::from(bytes))
        .map_err(|e| ProxyError::Upstream(e.to_string()))
}
