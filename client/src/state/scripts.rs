//! Script catalogue and execution history state.

#[cfg(test)]
#[path = "scripts_test.rs"]
mod scripts_test;

use std::sync::Arc;

use super::StoreCell;
use crate::net::api::{ApiError, DashboardApi};
use crate::net::types::{ExecutionStatus, Script, ScriptExecution};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptsState {
    pub scripts: Vec<Script>,
    /// Executions of the script last passed to `fetch_executions`.
    pub executions: Vec<ScriptExecution>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ScriptsState {
    #[must_use]
    pub fn global_scripts(&self) -> Vec<&Script> {
        self.scripts.iter().filter(|s| s.is_global).collect()
    }

    #[must_use]
    pub fn running_executions(&self) -> Vec<&ScriptExecution> {
        self.executions.iter().filter(|e| e.status == ExecutionStatus::Running).collect()
    }
}

pub struct ScriptsStore<C> {
    state: C,
    api: Arc<dyn DashboardApi>,
}

impl<C: Clone> Clone for ScriptsStore<C> {
    fn clone(&self) -> Self {
        Self { state: self.state.clone(), api: Arc::clone(&self.api) }
    }
}

impl<C: StoreCell<ScriptsState>> ScriptsStore<C> {
    pub fn new(state: C, api: Arc<dyn DashboardApi>) -> Self {
        Self { state, api }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    fn finish<T>(&self, what: &str, result: Result<T, ApiError>, apply: impl FnOnce(&mut ScriptsState, T)) -> Result<(), ApiError> {
        let outcome = match result {
            Ok(value) => {
                self.state.update_state(|s| apply(s, value));
                Ok(())
            }
            Err(err) => {
                log::warn!("scripts: {what} failed: {err}");
                self.state.update_state(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        };
        self.state.update_state(|s| s.loading = false);
        outcome
    }

    fn begin(&self) {
        self.state.update_state(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    /// Load the script catalogue.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn fetch_scripts(&self) -> Result<(), ApiError> {
        self.begin();
        let result = self.api.list_scripts().await;
        self.finish("fetch scripts", result, |s, scripts| s.scripts = scripts)
    }

    /// Load the execution history of one script.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn fetch_executions(&self, script_id: i64) -> Result<(), ApiError> {
        self.begin();
        let result = self.api.list_script_executions(script_id).await;
        self.finish("fetch executions", result, |s, executions| s.executions = executions)
    }

    pub fn clear_error(&self) {
        self.state.update_state(|s| s.error = None);
    }
}
