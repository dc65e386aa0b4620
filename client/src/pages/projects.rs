//! Project list, detail, file tree and commit history pages.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use super::{parse_id, settle, spawn_action};
use crate::app::{Projects, Session};
use crate::components::error_banner::ErrorBanner;
use crate::net::api::DEFAULT_COMMIT_LIMIT;
use crate::net::types::{Commit, Project};

/// Upper bound accepted from the `limit` query on the commits page.
pub const MAX_COMMIT_LIMIT: usize = 100;

/// Commit count requested by the commits page for a raw `limit` query value.
#[must_use]
pub fn commit_limit(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map_or(DEFAULT_COMMIT_LIMIT, |n| n.min(MAX_COMMIT_LIMIT))
}

/// `(label, href)` pairs for each directory level of a tree path, starting
/// at the project root.
#[must_use]
pub fn tree_crumbs(project_id: i64, path: &str) -> Vec<(String, String)> {
    let root = format!("/projects/{project_id}/tree");
    let mut crumbs = vec![("root".to_owned(), root.clone())];
    let mut href = root;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        href = format!("{href}/{segment}");
        crumbs.push((segment.to_owned(), href.clone()));
    }
    crumbs
}

#[must_use]
pub fn lock_label(project: &Project) -> &'static str {
    if project.is_blocked { "Unlock" } else { "Lock" }
}

fn project_error(projects: &Projects) -> (Signal<Option<String>>, Callback<()>) {
    let error = {
        let projects = projects.clone();
        Signal::derive(move || projects.state().with(|s| s.error.clone()))
    };
    let projects = projects.clone();
    (error, Callback::new(move |()| projects.clear_error()))
}

fn commit_rows(commits: Vec<Commit>) -> impl IntoView {
    commits
        .into_iter()
        .map(|c| {
            view! {
                <li class="commit-row">
                    <code class="commit-row__hash">{c.short_hash().to_owned()}</code>
                    <span class="commit-row__message">{c.message}</span>
                    <span class="commit-row__meta">{format!("{} · {}", c.author, c.date)}</span>
                </li>
            }
        })
        .collect_view()
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let projects = expect_context::<Projects>();
    let (error, dismiss) = project_error(&projects);

    {
        let projects = projects.clone();
        spawn_action(async move {
            settle("fetch_projects", projects.fetch_projects().await);
        });
    }

    let is_admin = Signal::derive(move || session.state().with(crate::state::auth::SessionState::is_admin));
    let list = {
        let projects = projects.clone();
        Signal::derive(move || projects.state().with(|s| s.projects.clone()))
    };
    let loading = {
        let projects = projects.clone();
        Signal::derive(move || projects.state().with(|s| s.loading))
    };
    let toggle = Callback::new(move |id: i64| {
        let projects = projects.clone();
        spawn_action(async move {
            settle("toggle_project_lock", projects.toggle_project_lock(id).await);
        });
    });

    view! {
        <div class="projects-page">
            <h1>"Projects"</h1>
            <ErrorBanner message=error on_dismiss=dismiss/>
            <Show when=move || loading.get()>
                <p>"Loading projects..."</p>
            </Show>
            <ul class="project-list">
                {move || {
                    list.get()
                        .into_iter()
                        .map(|p| {
                            let id = p.id;
                            let label = lock_label(&p);
                            let class = if p.is_blocked { "project-row project-row--locked" } else { "project-row" };
                            view! {
                                <li class=class>
                                    <a href=format!("/projects/{id}")>{p.name}</a>
                                    <span class="project-row__path">{p.path}</span>
                                    <Show when=move || is_admin.get()>
                                        <button class="btn" on:click=move |_| toggle.run(id)>{label}</button>
                                    </Show>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}

#[component]
pub fn ProjectDetailPage() -> impl IntoView {
    let projects = expect_context::<Projects>();
    let params = use_params_map();
    let (error, dismiss) = project_error(&projects);

    {
        let projects = projects.clone();
        Effect::new(move || {
            let Some(id) = parse_id(params.read().get("id")) else {
                return;
            };
            let projects = projects.clone();
            spawn_action(async move {
                if projects.fetch_project_by_id(id).await.is_ok() {
                    settle("fetch_commits", projects.fetch_commits(id, DEFAULT_COMMIT_LIMIT).await);
                }
            });
        });
    }

    let selected = {
        let projects = projects.clone();
        Signal::derive(move || projects.state().with(|s| s.selected_project.clone()))
    };
    let commits = Signal::derive(move || projects.state().with(|s| s.recent_commits.clone()));

    view! {
        <div class="project-page">
            <ErrorBanner message=error on_dismiss=dismiss/>
            {move || {
                selected
                    .get()
                    .map(|p| {
                        let id = p.id;
                        view! {
                            <h1>{p.name}</h1>
                            <p class="project-page__path">{p.path}</p>
                            <p class="project-page__description">{p.description.unwrap_or_default()}</p>
                            <nav class="project-page__links">
                                <a href=format!("/projects/{id}/tree")>"Files"</a>
                                <a href=format!("/projects/{id}/commits")>"Commits"</a>
                            </nav>
                        }
                    })
            }}
            <h2>"Recent commits"</h2>
            <ul class="commit-list">{move || commit_rows(commits.get())}</ul>
        </div>
    }
}

#[component]
pub fn ProjectTreePage() -> impl IntoView {
    let params = use_params_map();
    let crumbs = move || {
        let map = params.read();
        parse_id(map.get("id")).map(|id| tree_crumbs(id, &map.get("path").unwrap_or_default()))
    };

    view! {
        <div class="tree-page">
            <h1>"Files"</h1>
            <nav class="tree-page__crumbs">
                {move || {
                    crumbs()
                        .unwrap_or_default()
                        .into_iter()
                        .map(|(label, href)| view! { <a href=href>{label}</a> })
                        .collect_view()
                }}
            </nav>
            <p class="tree-page__empty">"File browsing is not available yet."</p>
        </div>
    }
}

#[component]
pub fn ProjectCommitsPage() -> impl IntoView {
    let projects = expect_context::<Projects>();
    let params = use_params_map();
    let query = use_query_map();
    let (error, dismiss) = project_error(&projects);

    {
        let projects = projects.clone();
        Effect::new(move || {
            let Some(id) = parse_id(params.read().get("id")) else {
                return;
            };
            let limit = commit_limit(query.read().get("limit").as_deref());
            let projects = projects.clone();
            spawn_action(async move {
                settle("fetch_commits", projects.fetch_commits(id, limit).await);
            });
        });
    }

    let commits = Signal::derive(move || projects.state().with(|s| s.recent_commits.clone()));

    view! {
        <div class="commits-page">
            <h1>"Commits"</h1>
            <ErrorBanner message=error on_dismiss=dismiss/>
            <ul class="commit-list">{move || commit_rows(commits.get())}</ul>
        </div>
    }
}
