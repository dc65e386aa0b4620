//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds every store once and provides it through context; pages pull
//! what they need with `expect_context`. `RouteGuard` sits inside the router
//! and re-runs the guard chain whenever the location or the session changes.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, ParamSegment, StaticSegment, WildcardSegment,
    components::{Redirect, Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::components::nav_bar::NavBar;
use crate::net::api::{DashboardApi, PendingApi};
use crate::pages::{
    admin::AdminPage,
    dashboard::DashboardPage,
    login::LoginPage,
    not_found::NotFoundPage,
    notifications::NotificationsPage,
    projects::{ProjectCommitsPage, ProjectDetailPage, ProjectTreePage, ProjectsPage},
    scripts::{ScriptExecutionsPage, ScriptsPage},
    telegram_auth::TelegramAuthPage,
};
use crate::router::routes::{LANDING_PATH, ResolvedRoute};
use crate::state::auth::{SessionState, SessionStore};
use crate::state::notifications::{NotificationsState, NotificationsStore};
use crate::state::projects::{ProjectsState, ProjectsStore};
use crate::state::scripts::{ScriptsState, ScriptsStore};
use crate::util::token_storage::{BrowserTokenStorage, TokenStorage};

pub type Session = SessionStore<RwSignal<SessionState>>;
pub type Projects = ProjectsStore<RwSignal<ProjectsState>>;
pub type Notifications = NotificationsStore<RwSignal<NotificationsState>>;
pub type Scripts = ScriptsStore<RwSignal<ScriptsState>>;

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

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api: Arc<dyn DashboardApi> = Arc::new(PendingApi);
    let storage: Arc<dyn TokenStorage> = Arc::new(BrowserTokenStorage);

    let session: Session =
        SessionStore::new(RwSignal::new(SessionState::restore(storage.as_ref())), api.clone(), storage);
    let projects: Projects = ProjectsStore::new(RwSignal::new(ProjectsState::default()), api.clone());
    let notifications: Notifications = NotificationsStore::new(RwSignal::new(NotificationsState::default()), api.clone());
    let scripts: Scripts = ScriptsStore::new(RwSignal::new(ScriptsState::default()), api);

    provide_context(session.clone());
    provide_context(projects);
    provide_context(notifications);
    provide_context(scripts);

    // Resolve the user behind a stored token once the app is live.
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        crate::pages::settle("fetch_current_user", session.fetch_current_user().await);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = session;

    view! {
        <Stylesheet id="leptos" href="/pkg/lumastack.css"/>
        <Title text="LumaStack"/>

        <Router>
            <RouteGuard/>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=LANDING_PATH/> }/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route
                        path=(StaticSegment("auth"), StaticSegment("telegram"), ParamSegment("token"))
                        view=TelegramAuthPage
                    />
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("projects") view=ProjectsPage/>
                    <Route path=(StaticSegment("projects"), ParamSegment("id")) view=ProjectDetailPage/>
                    <Route
                        path=(StaticSegment("projects"), ParamSegment("id"), StaticSegment("tree"), WildcardSegment("path"))
                        view=ProjectTreePage
                    />
                    <Route
                        path=(StaticSegment("projects"), ParamSegment("id"), StaticSegment("commits"))
                        view=ProjectCommitsPage
                    />
                    <Route path=StaticSegment("scripts") view=ScriptsPage/>
                    <Route
                        path=(StaticSegment("scripts"), ParamSegment("id"), StaticSegment("executions"))
                        view=ScriptExecutionsPage
                    />
                    <Route path=StaticSegment("notifications") view=NotificationsPage/>
                    <Route path=StaticSegment("admin") view=AdminPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Runs the navigation guards on every location or session change and
/// replaces the location when they redirect.
#[component]
fn RouteGuard() -> impl IntoView {
    let session = expect_context::<Session>();
    let location = use_location();
    let navigate = use_navigate();
    let previous = StoredValue::new(None::<ResolvedRoute>);

    Effect::new(move || {
        let path = location.pathname.get();
        let search = location.search.get();
        let search = search.trim_start_matches('?');
        let full_path = if search.is_empty() { path } else { format!("{path}?{search}") };
        let snapshot = session.state().with(SessionState::snapshot);

        let from = previous.get_value();
        match crate::router::navigate(from.as_ref(), &full_path, snapshot) {
            Ok(outcome) => {
                if outcome.redirected_from.is_some() {
                    navigate(&outcome.route.full_path, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                previous.set_value(Some(outcome.route));
            }
            Err(err) => log::error!("{err}"),
        }
    });
}
