//! `reqwest`-backed auth service for the terminal client.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use access::service::{self, AuthResponse, AuthService, Credentials, Endpoint, Registration};
use access::{AuthError, User};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

const CONNECT_TIMEOUT_SECS: u64 = 5;

pub struct ReqwestAuthService {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestAuthService {
    /// Build a client whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error when the TLS backend cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    async fn send(&self, endpoint: Endpoint, body: Option<Value>, token: Option<&str>) -> Result<String, AuthError> {
        let url = endpoint.url(&self.base_url);
        let request = match endpoint {
            Endpoint::Me => self.http.get(&url),
            Endpoint::Login | Endpoint::Register => self.http.post(&url),
        };
        let mut request = request.header(ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, service::bearer(token));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!(%url, "auth request");
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if status.is_success() {
            Ok(text)
        } else {
            Err(service::error_for_status(endpoint, status.as_u16(), &text))
        }
    }
}

fn transport_error(error: reqwest::Error) -> AuthError {
    if error.is_timeout() {
        AuthError::Network(service::TIMEOUT_MESSAGE.to_owned())
    } else {
        AuthError::Network(error.to_string())
    }
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<Value, AuthError> {
    serde_json::to_value(value).map_err(|e| AuthError::Validation(e.to_string()))
}

#[async_trait(?Send)]
impl AuthService for ReqwestAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError> {
        let body = self.send(Endpoint::Login, Some(to_payload(credentials)?), None).await?;
        service::parse_body(&body)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, AuthError> {
        let body = self
            .send(Endpoint::Register, Some(to_payload(registration)?), None)
            .await?;
        service::parse_body(&body)
    }

    async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let body = self.send(Endpoint::Me, None, Some(token)).await?;
        service::parse_body(&body)
    }
}
