use super::*;

#[test]
fn full_location_without_query_is_the_path() {
    assert_eq!(full_location("/admin/users", ""), "/admin/users");
    assert_eq!(full_location("/admin/users", "?"), "/admin/users");
}

#[test]
fn full_location_normalizes_leading_question_mark() {
    assert_eq!(full_location("/qa/bugs", "?page=2"), "/qa/bugs?page=2");
    assert_eq!(full_location("/qa/bugs", "page=2"), "/qa/bugs?page=2");
}
