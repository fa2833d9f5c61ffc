use super::*;

#[test]
fn endpoint_url_joins_base_without_double_slash() {
    assert_eq!(Endpoint::Login.url("/api"), "/api/auth/login");
    assert_eq!(Endpoint::Me.url("https://api.example.com/v1/"), "https://api.example.com/v1/auth/me");
    assert_eq!(Endpoint::Register.url(""), "/auth/register");
}

#[test]
fn registration_flattens_role_fields() {
    let reg = Registration::new("Ada", "ada@acme.test", "pw", Role::Client)
        .with_field("company", "Acme")
        .with_field("contactNumber", "555-0100");
    let body = serde_json::to_value(&reg).unwrap();
    assert_eq!(body["role"], "client");
    assert_eq!(body["company"], "Acme");
    assert_eq!(body["contactNumber"], "555-0100");
    assert!(body.get("fields").is_none());
}

#[test]
fn client_registration_requires_company_and_contact() {
    let base = Registration::new("Ada", "ada@acme.test", "pw", Role::Client);
    assert!(matches!(base.validate(), Err(AuthError::Validation(_))));

    let only_company = base.clone().with_field("company", "Acme");
    assert!(only_company.validate().is_err());

    let blank_contact = only_company.clone().with_field("contactNumber", "  ");
    assert!(blank_contact.validate().is_err());

    let complete = only_company.with_field("contactNumber", "555");
    assert_eq!(complete.validate(), Ok(()));
}

#[test]
fn staff_registration_ignores_role_fields() {
    let reg = Registration::new("Lin", "lin@studio.test", "pw", Role::Designer).with_field("portfolio", 3);
    assert_eq!(reg.validate(), Ok(()));
}

#[test]
fn me_401_maps_to_unauthenticated() {
    let err = error_for_status(Endpoint::Me, 401, r#"{"message":"Token expired"}"#);
    assert_eq!(err, AuthError::Unauthenticated("Token expired".to_owned()));
    assert!(err.is_unauthenticated());
}

#[test]
fn login_401_maps_to_invalid_credentials_with_body_message() {
    let err = error_for_status(Endpoint::Login, 401, r#"{"message":"Invalid email or password"}"#);
    assert_eq!(err, AuthError::InvalidCredentials("Invalid email or password".to_owned()));
    assert_eq!(err.to_string(), "Invalid email or password");
}

#[test]
fn login_without_body_uses_default_message() {
    let err = error_for_status(Endpoint::Login, 400, "");
    assert_eq!(
        err,
        AuthError::InvalidCredentials("Login failed. Please check your credentials.".to_owned())
    );
}

#[test]
fn register_conflict_maps_to_rejected() {
    let err = error_for_status(Endpoint::Register, 409, r#"{"error":"Email already registered"}"#);
    assert_eq!(err, AuthError::Rejected { status: 409, message: "Email already registered".to_owned() });
}

#[test]
fn server_errors_on_me_do_not_sign_out() {
    let err = error_for_status(Endpoint::Me, 503, "upstream unavailable");
    assert!(!err.is_unauthenticated());
}

#[test]
fn extract_message_prefers_message_then_error_then_detail() {
    assert_eq!(extract_error_message(r#"{"detail":"d","error":"e"}"#).as_deref(), Some("e"));
    assert_eq!(extract_error_message(r#"{"detail":"d"}"#).as_deref(), Some("d"));
    assert_eq!(extract_error_message(r#"{"message":" ","detail":"d"}"#).as_deref(), Some("d"));
    assert_eq!(extract_error_message(r#"{"code":7}"#), None);
}

#[test]
fn extract_message_skips_html_and_long_bodies() {
    assert_eq!(extract_error_message("<html>bad gateway</html>"), None);
    assert_eq!(extract_error_message(&"x".repeat(500)), None);
    assert_eq!(extract_error_message("  Forbidden \n").as_deref(), Some("Forbidden"));
}

#[test]
fn parse_body_reports_invalid_shape() {
    let err = parse_body::<AuthResponse>(r#"{"token":"t"}"#).unwrap_err();
    assert!(matches!(err, AuthError::InvalidResponse(_)));
}

#[test]
fn bearer_formats_header() {
    assert_eq!(bearer("abc"), "Bearer abc");
}
