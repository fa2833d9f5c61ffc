use super::*;

#[test]
fn section_title_capitalizes_each_word() {
    assert_eq!(section_title("test-cases"), "Test Cases");
    assert_eq!(section_title("dashboard"), "Dashboard");
}

#[test]
fn section_title_ignores_stray_dashes() {
    assert_eq!(section_title("-bugs--open-"), "Bugs Open");
    assert_eq!(section_title(""), "");
}
