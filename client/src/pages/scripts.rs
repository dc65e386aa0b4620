//! Script catalogue and per-script execution history.

#[cfg(test)]
#[path = "scripts_test.rs"]
mod scripts_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::{parse_id, settle, spawn_action};
use crate::app::Scripts;
use crate::components::error_banner::ErrorBanner;
use crate::net::types::{ExecutionStatus, Script, ScriptExecution};

#[must_use]
pub fn status_class(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Running => "status status--running",
        ExecutionStatus::Completed => "status status--ok",
        ExecutionStatus::Failed => "status status--failed",
    }
}

#[must_use]
pub fn status_label(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Running => "running",
        ExecutionStatus::Completed => "completed",
        ExecutionStatus::Failed => "failed",
    }
}

/// Scope shown next to a script name.
#[must_use]
pub fn script_scope(script: &Script) -> String {
    match (script.is_global, script.project_id) {
        (true, _) => "global".to_owned(),
        (false, Some(id)) => format!("project #{id}"),
        (false, None) => "unscoped".to_owned(),
    }
}

/// Output for a finished run, preferring the error stream when present.
#[must_use]
pub fn execution_output(execution: &ScriptExecution) -> Option<&str> {
    execution.error.as_deref().or(execution.output.as_deref()).filter(|s| !s.is_empty())
}

fn scripts_error(scripts: &Scripts) -> (Signal<Option<String>>, Callback<()>) {
    let error = {
        let scripts = scripts.clone();
        Signal::derive(move || scripts.state().with(|s| s.error.clone()))
    };
    let scripts = scripts.clone();
    (error, Callback::new(move |()| scripts.clear_error()))
}

#[component]
pub fn ScriptsPage() -> impl IntoView {
    let scripts = expect_context::<Scripts>();
    let (error, dismiss) = scripts_error(&scripts);

    {
        let scripts = scripts.clone();
        spawn_action(async move {
            settle("fetch_scripts", scripts.fetch_scripts().await);
        });
    }

    let list = Signal::derive(move || scripts.state().with(|s| s.scripts.clone()));

    view! {
        <div class="scripts-page">
            <h1>"Scripts"</h1>
            <ErrorBanner message=error on_dismiss=dismiss/>
            <ul class="script-list">
                {move || {
                    list.get()
                        .into_iter()
                        .map(|script| {
                            let scope = script_scope(&script);
                            view! {
                                <li class="script-row">
                                    <a href=format!("/scripts/{}/executions", script.id)>{script.name}</a>
                                    <span class="script-row__scope">{scope}</span>
                                    <span class="script-row__description">{script.description.unwrap_or_default()}</span>
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
pub fn ScriptExecutionsPage() -> impl IntoView {
    let scripts = expect_context::<Scripts>();
    let params = use_params_map();
    let (error, dismiss) = scripts_error(&scripts);

    {
        let scripts = scripts.clone();
        Effect::new(move || {
            let Some(id) = parse_id(params.read().get("id")) else {
                return;
            };
            let scripts = scripts.clone();
            spawn_action(async move {
                settle("fetch_executions", scripts.fetch_executions(id).await);
            });
        });
    }

    let executions = Signal::derive(move || scripts.state().with(|s| s.executions.clone()));

    view! {
        <div class="executions-page">
            <h1>"Executions"</h1>
            <ErrorBanner message=error on_dismiss=dismiss/>
            <ul class="execution-list">
                {move || {
                    executions
                        .get()
                        .into_iter()
                        .map(|run| {
                            let output = execution_output(&run).map(str::to_owned);
                            view! {
                                <li class="execution-row">
                                    <span class=status_class(run.status)>{status_label(run.status)}</span>
                                    <span class="execution-row__started">{run.started_at}</span>
                                    <span class="execution-row__finished">{run.finished_at.unwrap_or_default()}</span>
                                    {output.map(|text| view! { <pre class="execution-row__output">{text}</pre> })}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
