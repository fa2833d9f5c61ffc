use super::*;
use crate::role::dashboard_path;
use crate::routes::{RouteAccess, route_access};

#[test]
fn every_menu_starts_with_dashboard() {
    for role in Role::ALL {
        let first = menu_for(role).first().expect("menu not empty");
        assert_eq!(first.path, dashboard_path(role));
        assert_eq!(first.label, "Dashboard");
    }
}

#[test]
fn every_menu_item_is_admitted_for_its_role() {
    for role in Role::ALL {
        for item in menu_for(role) {
            match route_access(item.path) {
                RouteAccess::Protected(rule) => assert!(rule.admits(role), "{role} -> {}", item.path),
                other => panic!("{} is not protected: {other:?}", item.path),
            }
        }
    }
}

#[test]
fn menu_paths_are_unique_within_a_role() {
    for role in Role::ALL {
        let mut paths: Vec<_> = menu_for(role).iter().map(|item| item.path).collect();
        let before = paths.len();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), before, "{role}");
    }
}

#[test]
fn find_item_ignores_query_and_trailing_slash() {
    let item = find_item(Role::Client, "/client/invoices/?page=2").unwrap();
    assert_eq!(item.label, "Invoices");
    assert!(find_item(Role::Client, "/admin/users").is_none());
}
