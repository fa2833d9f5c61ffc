use super::*;

fn form(role: Role) -> RegisterForm {
    RegisterForm {
        name: " Ada ".to_owned(),
        email: " ada@example.com ".to_owned(),
        password: "pw".to_owned(),
        role,
        company: " Acme ".to_owned(),
        contact_number: "555-0100".to_owned(),
    }
}

#[test]
fn client_registration_carries_company_fields() {
    let registration = form(Role::Client).to_registration();
    assert_eq!(registration.email, "ada@example.com");
    assert_eq!(registration.fields.get("company").and_then(|v| v.as_str()), Some("Acme"));
    assert_eq!(registration.fields.get("contactNumber").and_then(|v| v.as_str()), Some("555-0100"));
    assert!(registration.validate().is_ok());
}

#[test]
fn non_client_registration_drops_company_fields() {
    let registration = form(Role::Designer).to_registration();
    assert_eq!(registration.name, "Ada");
    assert!(registration.fields.is_empty());
}

#[test]
fn client_registration_with_blank_company_fails_validation() {
    let mut input = form(Role::Client);
    input.company = "   ".to_owned();
    assert!(input.to_registration().validate().is_err());
}

#[test]
fn blank_from_is_ignored() {
    assert_eq!(return_to(None), None);
    assert_eq!(return_to(Some("  ".to_owned())), None);
    assert_eq!(return_to(Some("/qa/bugs".to_owned())).as_deref(), Some("/qa/bugs"));
}

#[test]
fn unknown_role_choice_defaults_to_developer() {
    assert_eq!(role_choice("client"), Role::Client);
    assert_eq!(role_choice("wizard"), Role::Developer);
}
