use std::net::SocketAddr;
use std::time::Duration;

use axum::http::Method;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::*;

fn state_for(upstream: Option<String>, timeout: Duration) -> ProxyState {
    let config = ServerConfig { port: 0, api_base_url: upstream, proxy_timeout: timeout };
    ProxyState::new(&config).unwrap()
}

fn get(uri: &str) -> Request {
    axum::http::Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap()
}

/// Answer one request with `response`, handing the raw request head back.
async fn one_shot_server(response: String) -> (SocketAddr, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0_u8; 8192];
        let n = socket.read(&mut buf).await.unwrap();
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&buf[..n]).into_owned()
    });
    (addr, handle)
}

#[test]
fn upstream_url_strips_api_prefix() {
    assert_eq!(upstream_url("http://b:5000/api", "/api/auth/me", None), "http://b:5000/api/auth/me");
    assert_eq!(upstream_url("http://b:5000/", "/api/auth/login", None), "http://b:5000/auth/login");
}

#[test]
fn upstream_url_keeps_query() {
    assert_eq!(
        upstream_url("http://b", "/api/projects", Some("page=2&q=x")),
        "http://b/projects?page=2&q=x"
    );
    assert_eq!(upstream_url("http://b", "/api/projects", Some("")), "http://b/projects");
}

#[test]
fn error_statuses() {
    assert_eq!(ProxyError::NotConfigured.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ProxyError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(ProxyError::Upstream("x".into()).status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn unconfigured_upstream_is_503() {
    let state = state_for(None, Duration::from_secs(1));
    let err = forward(State(state), get("/api/auth/me")).await.unwrap_err();
    assert_eq!(err, ProxyError::NotConfigured);
    assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn silent_upstream_is_504() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let state = state_for(Some(format!("http://{addr}")), Duration::from_millis(200));
    let err = forward(State(state), get("/api/auth/me")).await.unwrap_err();
    assert_eq!(err, ProxyError::Timeout);
}

#[tokio::test]
async fn upstream_status_and_body_pass_through_with_bearer() {
    let body = r#"{"message":"jwt expired"}"#;
    let response = format!(
        "HTTP/1.1 401 Unauthorized\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (addr, seen) = one_shot_server(response).await;

    let state = state_for(Some(format!("http://{addr}/v1")), Duration::from_secs(5));
    let request = axum::http::Request::builder()
        .uri("/api/auth/me")
        .header(AUTHORIZATION, "Bearer tok-1")
        .header("x-internal", "drop-me")
        .body(Body::empty())
        .unwrap();
    let reply = forward(State(state), request).await.unwrap();

    assert_eq!(reply.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(reply.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap(), "application/json");
    let bytes = to_bytes(reply.into_body(), MAX_BODY_BYTES).await.unwrap();
    assert_eq!(&bytes[..], body.as_bytes());

    let head = seen.await.unwrap().to_ascii_lowercase();
    assert!(head.starts_with("get /v1/auth/me "), "{head}");
    assert!(head.contains("authorization: bearer tok-1"), "{head}");
    assert!(!head.contains("x-internal"), "{head}");
}
