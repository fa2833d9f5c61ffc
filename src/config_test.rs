use std::collections::HashMap;

use super::*;

fn config_with(pairs: &[(&str, &str)]) -> ServerConfig {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    ServerConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_apply_when_unset() {
    let cfg = config_with(&[]);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_base_url, None);
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS));
}

#[test]
fn api_base_url_is_trimmed() {
    let cfg = config_with(&[("API_BASE_URL", " http://backend:5000/api/ ")]);
    assert_eq!(cfg.api_base_url.as_deref(), Some("http://backend:5000/api"));
}

#[test]
fn blank_api_base_url_counts_as_unset() {
    assert_eq!(config_with(&[("API_BASE_URL", "   ")]).api_base_url, None);
}

#[test]
fn malformed_numbers_fall_back_to_defaults() {
    let cfg = config_with(&[("PORT", "http"), ("PROXY_TIMEOUT_SECS", "-4")]);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS));
}

#[test]
fn explicit_values_are_used() {
    let cfg = config_with(&[("PORT", "8080"), ("PROXY_TIMEOUT_SECS", "5")]);
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(5));
}

#[test]
fn zero_timeout_is_raised_to_one_second() {
    assert_eq!(config_with(&[("PROXY_TIMEOUT_SECS", "0")]).proxy_timeout, Duration::from_secs(1));
}
