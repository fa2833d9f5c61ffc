//! Per-role side navigation.
//!
//! Menus are a direct rendering of the route table: every entry lives under
//! the role's own subtree, so a menu can never link somewhere the guard
//! would refuse.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::role::Role;
use crate::routes::normalize_path;

/// A single side-navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

const fn item(label: &'static str, path: &'static str) -> NavItem {
    NavItem { label, path }
}

const ADMIN_MENU: &[NavItem] = &[
    item("Dashboard", "/admin/dashboard"),
    item("Users", "/admin/users"),
    item("Projects", "/admin/projects"),
    item("Clients", "/admin/clients"),
    item("Reports", "/admin/reports"),
    item("Settings", "/admin/settings"),
];

const PROJECT_MANAGER_MENU: &[NavItem] = &[
    item("Dashboard", "/project-manager/dashboard"),
    item("Projects", "/project-manager/projects"),
    item("Task Board", "/project-manager/tasks"),
    item("Team", "/project-manager/team"),
    item("Timesheets", "/project-manager/timesheets"),
    item("Messages", "/project-manager/messages"),
    item("Documents", "/project-manager/documents"),
];

const DEVELOPER_MENU: &[NavItem] = &[
    item("Dashboard", "/developer/dashboard"),
    item("Task Board", "/developer/tasks"),
    item("Timesheet", "/developer/timesheet"),
    item("Messages", "/developer/messages"),
    item("Documents", "/developer/documents"),
];

const QA_MENU: &[NavItem] = &[
    item("Dashboard", "/qa/dashboard"),
    item("Test Cases", "/qa/test-cases"),
    item("Bug Reports", "/qa/bugs"),
    item("Task Board", "/qa/tasks"),
    item("Timesheet", "/qa/timesheet"),
    item("Messages", "/qa/messages"),
];

const DESIGNER_MENU: &[NavItem] = &[
    item("Dashboard", "/designer/dashboard"),
    item("Designs", "/designer/designs"),
    item("Task Board", "/designer/tasks"),
    item("Timesheet", "/designer/timesheet"),
    item("Messages", "/designer/messages"),
];

const CLIENT_MENU: &[NavItem] = &[
    item("Dashboard", "/client/dashboard"),
    item("Projects", "/client/projects"),
    item("Invoices", "/client/invoices"),
    item("Messages", "/client/messages"),
    item("Documents", "/client/documents"),
];

/// Side-navigation entries for `role`, dashboard first.
#[must_use]
pub fn menu_for(role: Role) -> &'static [NavItem] {
    match role {
        Role::Admin => ADMIN_MENU,
        Role::ProjectManager => PROJECT_MANAGER_MENU,
        Role::Developer => DEVELOPER_MENU,
        Role::QaEngineer => QA_MENU,
        Role::Designer => DESIGNER_MENU,
        Role::Client => CLIENT_MENU,
    }
}

/// Menu entry matching `location` (query and trailing slash ignored).
#[must_use]
pub fn find_item(role: Role, location: &str) -> Option<&'static NavItem> {
    let path = normalize_path(location);
    menu_for(role).iter().find(|item| item.path == path)
}
