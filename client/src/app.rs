//! Root application component with routing and context providers.

use access::routes::{NOT_FOUND_PATH, workspace_rule};
use access::{AuthState, Role, dashboard_path};
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Redirect, Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::pages::{
    auth::AuthPage,
    debug::DebugPage,
    home::HomePage,
    not_found::NotFoundPage,
    unauthorized::UnauthorizedPage,
    workspace::{RoleWorkspace, SectionPage},
};
use crate::state::auth::AuthProvider;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Guarded workspace for one role subtree.
fn role_subtree(role: Role) -> impl IntoView {
    let allowed = workspace_rule(role).allowed_roles.to_vec();
    view! {
        <ProtectedRoute allowed_roles=allowed>
            <RoleWorkspace role=role/>
        </ProtectedRoute>
    }
}

/// `/<prefix>` on its own lands on the role dashboard.
fn dashboard_redirect(role: Role) -> impl IntoView {
    view! { <Redirect path=dashboard_path(role)/> }
}

/// Root application component.
///
/// Provides the auth state signal and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/workhub.css"/>
        <Title text="WorkHub"/>

        <Router>
            <AuthProvider>
                <Routes fallback=|| view! { <Redirect path=NOT_FOUND_PATH/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route
                        path=StaticSegment("auth")
                        view=|| view! { <ProtectedRoute require_auth=false><AuthPage/></ProtectedRoute> }
                    />
                    <Route path=StaticSegment("debug") view=DebugPage/>
                    <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>
                    <Route path=StaticSegment("not-found") view=NotFoundPage/>

                    <ParentRoute path=StaticSegment("admin") view=|| role_subtree(Role::Admin)>
                        <Route path=ParamSegment("section") view=SectionPage/>
                        <Route path=StaticSegment("") view=|| dashboard_redirect(Role::Admin)/>
                    </ParentRoute>
                    <ParentRoute path=StaticSegment("project-manager") view=|| role_subtree(Role::ProjectManager)>
                        <Route path=ParamSegment("section") view=SectionPage/>
                        <Route path=StaticSegment("") view=|| dashboard_redirect(Role::ProjectManager)/>
                    </ParentRoute>
                    <ParentRoute path=StaticSegment("developer") view=|| role_subtree(Role::Developer)>
                        <Route path=ParamSegment("section") view=SectionPage/>
                        <Route path=StaticSegment("") view=|| dashboard_redirect(Role::Developer)/>
                    </ParentRoute>
                    <ParentRoute path=StaticSegment("qa") view=|| role_subtree(Role::QaEngineer)>
                        <Route path=ParamSegment("section") view=SectionPage/>
                        <Route path=StaticSegment("") view=|| dashboard_redirect(Role::QaEngineer)/>
                    </ParentRoute>
                    <ParentRoute path=StaticSegment("designer") view=|| role_subtree(Role::Designer)>
                        <Route path=ParamSegment("section") view=SectionPage/>
                        <Route path=StaticSegment("") view=|| dashboard_redirect(Role::Designer)/>
                    </ParentRoute>
                    <ParentRoute path=StaticSegment("client") view=|| role_subtree(Role::Client)>
                        <Route path=ParamSegment("section") view=SectionPage/>
                        <Route path=StaticSegment("") view=|| dashboard_redirect(Role::Client)/>
                    </ParentRoute>
                </Routes>
            </AuthProvider>
        </Router>
    }
}
