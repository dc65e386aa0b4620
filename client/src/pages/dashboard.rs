//! Landing page: headline counts across projects, notifications and scripts.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use super::{settle, spawn_action};
use crate::app::{Notifications, Projects, Scripts, Session};
use crate::state::notifications::NotificationsState;
use crate::state::projects::ProjectsState;
use crate::state::scripts::ScriptsState;

/// Numbers shown on the dashboard cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub projects: usize,
    pub blocked_projects: usize,
    pub unread_notifications: usize,
    pub running_executions: usize,
}

impl DashboardSummary {
    #[must_use]
    pub fn collect(projects: &ProjectsState, notifications: &NotificationsState, scripts: &ScriptsState) -> Self {
        Self {
            projects: projects.projects_count(),
            blocked_projects: projects.blocked_projects().len(),
            unread_notifications: notifications.unread_count(),
            running_executions: scripts.running_executions().len(),
        }
    }
}

/// Greeting line for the signed-in user.
#[must_use]
pub fn greeting(username: Option<&str>) -> String {
    match username {
        Some(name) => format!("Welcome back, {name}"),
        None => "Welcome".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let projects = expect_context::<Projects>();
    let notifications = expect_context::<Notifications>();
    let scripts = expect_context::<Scripts>();

    {
        let (projects, notifications, scripts) = (projects.clone(), notifications.clone(), scripts.clone());
        spawn_action(async move {
            settle("fetch_projects", projects.fetch_projects().await);
            settle("fetch_notifications", notifications.fetch_notifications().await);
            settle("fetch_scripts", scripts.fetch_scripts().await);
        });
    }

    let summary = Signal::derive(move || {
        projects.state().with(|p| {
            notifications.state().with(|n| scripts.state().with(|s| DashboardSummary::collect(p, n, s)))
        })
    });
    let title = Signal::derive(move || session.state().with(|s| greeting(s.user.as_ref().map(|u| u.username.as_str()))));

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{move || title.get()}</h1>
            </header>
            <div class="dashboard-page__cards">
                <a class="dashboard-card" href="/projects">
                    <span class="dashboard-card__value">{move || summary.get().projects}</span>
                    <span class="dashboard-card__label">"Projects"</span>
                </a>
                <a class="dashboard-card" href="/projects">
                    <span class="dashboard-card__value">{move || summary.get().blocked_projects}</span>
                    <span class="dashboard-card__label">"Locked"</span>
                </a>
                <a class="dashboard-card" href="/notifications">
                    <span class="dashboard-card__value">{move || summary.get().unread_notifications}</span>
                    <span class="dashboard-card__label">"Unread notifications"</span>
                </a>
                <a class="dashboard-card" href="/scripts">
                    <span class="dashboard-card__value">{move || summary.get().running_executions}</span>
                    <span class="dashboard-card__label">"Running scripts"</span>
                </a>
            </div>
        </div>
    }
}
