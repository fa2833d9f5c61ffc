use super::*;

#[test]
fn phase_names_are_stable() {
    assert_eq!(phase_name(&AuthPhase::Uninitialized), "uninitialized");
    assert_eq!(phase_name(&AuthPhase::Anonymous), "anonymous");
}

#[test]
fn long_tokens_keep_only_their_ends() {
    assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload.sig"), "eyJhbG....sig");
}

#[test]
fn short_tokens_are_fully_masked() {
    assert_eq!(mask_token("abc"), "***");
    assert_eq!(mask_token(""), "");
}

#[test]
fn only_successful_refresh_is_reported() {
    assert_eq!(refresh_message(true), Some("Session refreshed."));
    assert_eq!(refresh_message(false), None);
}
