pub mod protected_route;
pub mod side_nav;
