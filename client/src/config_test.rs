use super::*;

#[test]
fn parse_defaults_when_unset() {
    assert_eq!(ClientConfig::parse(None, None), ClientConfig::default());
}

#[test]
fn parse_trims_trailing_slash_from_base() {
    let config = ClientConfig::parse(Some("https://api.example.com/v1/"), None);
    assert_eq!(config.api_base, "https://api.example.com/v1");
}

#[test]
fn parse_ignores_blank_base() {
    assert_eq!(ClientConfig::parse(Some("   "), None).api_base, DEFAULT_API_BASE);
}

#[test]
fn parse_reads_timeout() {
    assert_eq!(ClientConfig::parse(None, Some(" 2500 ")).request_timeout_ms, 2500);
}

#[test]
fn parse_rejects_zero_or_garbage_timeout() {
    assert_eq!(ClientConfig::parse(None, Some("0")).request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    assert_eq!(ClientConfig::parse(None, Some("soon")).request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
}
