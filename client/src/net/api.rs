//! REST auth service for the browser.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each raced against
//! a `gloo-timers` deadline so a hung request surfaces as a network error
//! instead of leaving the UI loading forever.
//! Server-side (SSR): stubs returning a network error, since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is an `AuthError`; non-2xx statuses go through
//! `access::service::error_for_status` so the CLI and browser agree.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use access::service::{self, AuthResponse, AuthService, Credentials, Endpoint, Registration};
use access::{AuthError, User};
use async_trait::async_trait;

use crate::config::ClientConfig;

#[cfg(any(test, feature = "hydrate"))]
fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(any(test, feature = "hydrate"))]
fn uses_get(endpoint: Endpoint) -> bool {
    matches!(endpoint, Endpoint::Me)
}

#[cfg(any(test, feature = "hydrate"))]
fn settle(endpoint: Endpoint, status: u16, body: &str) -> Result<String, AuthError> {
    if is_success(status) {
        Ok(body.to_owned())
    } else {
        Err(service::error_for_status(endpoint, status, body))
    }
}

/// `fetch`-backed [`AuthService`].
#[derive(Clone, Debug)]
pub struct HttpAuthService {
    config: ClientConfig,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one request and return the body of a 2xx response.
    async fn send(
        &self,
        endpoint: Endpoint,
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> Result<String, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};
            use gloo_net::http::Request;

            let url = endpoint.url(&self.config.api_base);
            let mut builder = if uses_get(endpoint) { Request::get(&url) } else { Request::post(&url) };
            builder = builder.header("Accept", "application/json");
            if let Some(token) = token {
                builder = builder.header("Authorization", &service::bearer(token));
            }
            let request = match body {
                Some(payload) => builder.json(&payload),
                None => builder.build(),
            }
            .map_err(|e| AuthError::Network(e.to_string()))?;

            let exchange = Box::pin(async move {
                let resp = request.send().await?;
                let status = resp.status();
                let text = resp.text().await?;
                Ok::<_, gloo_net::Error>((status, text))
            });
            let deadline = Box::pin(gloo_timers::future::TimeoutFuture::new(self.config.request_timeout_ms));

            match select(exchange, deadline).await {
                Either::Left((Ok((status, text)), _)) => settle(endpoint, status, &text),
                Either::Left((Err(e), _)) => Err(AuthError::Network(e.to_string())),
                Either::Right(((), _)) => {
                    tracing::warn!(path = endpoint.path(), "auth request timed out");
                    Err(AuthError::Network(service::TIMEOUT_MESSAGE.to_owned()))
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (endpoint, body, token);
            Err(AuthError::Network("not available on server".to_owned()))
        }
    }
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AuthError> {
    serde_json::to_value(value).map_err(|e| AuthError::Validation(e.to_string()))
}

#[async_trait(?Send)]
impl AuthService for HttpAuthService {
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
