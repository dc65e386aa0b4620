//! Administration overview, reachable by admins only.

use leptos::prelude::*;

use super::{settle, spawn_action};
use crate::app::{Projects, Session};

#[component]
pub fn AdminPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let projects = expect_context::<Projects>();

    {
        let projects = projects.clone();
        spawn_action(async move {
            settle("fetch_projects", projects.fetch_projects().await);
        });
    }

    let account = Signal::derive(move || {
        session.state().with(|s| s.user.as_ref().map(|u| format!("{} <{}> ({})", u.username, u.email, u.role)))
    });
    let locked = Signal::derive(move || {
        projects.state().with(|s| s.blocked_projects().into_iter().map(|p| (p.id, p.name.clone())).collect::<Vec<_>>())
    });

    view! {
        <div class="admin-page">
            <h1>"Administration"</h1>
            <p class="admin-page__account">{move || account.get().unwrap_or_default()}</p>
            <h2>"Locked projects"</h2>
            <ul class="project-list">
                {move || {
                    locked
                        .get()
                        .into_iter()
                        .map(|(id, name)| view! { <li><a href=format!("/projects/{id}")>{name}</a></li> })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
