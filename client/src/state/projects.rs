//! Project inventory state for the dashboard and project pages.
//!
//! DESIGN
//! ======
//! Inventory (`projects`), the focused project, and its recent history live
//! together because the detail pages read all three. Local state changes only
//! after the API confirms them.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use std::sync::Arc;

use super::StoreCell;
use crate::net::api::{ApiError, DashboardApi};
use crate::net::types::{Commit, Project};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectsState {
    pub projects: Vec<Project>,
    pub selected_project: Option<Project>,
    pub recent_commits: Vec<Commit>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProjectsState {
    #[must_use]
    pub fn projects_count(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn blocked_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.is_blocked).collect()
    }

    /// Replace the stored copy of `project` (inventory and selection) with
    /// the fresh one, appending it to the inventory if unknown.
    fn upsert(&mut self, project: Project) {
        if let Some(slot) = self.projects.iter_mut().find(|p| p.id == project.id) {
            slot.clone_from(&project);
        } else {
            self.projects.push(project.clone());
        }
        if self.selected_project.as_ref().is_some_and(|p| p.id == project.id) {
            self.selected_project = Some(project);
        }
    }

    fn begin_request(&mut self) {
        self.loading = true;
        self.error = None;
    }
}

pub struct ProjectsStore<C> {
    state: C,
    api: Arc<dyn DashboardApi>,
}

impl<C: Clone> Clone for ProjectsStore<C> {
    fn clone(&self) -> Self {
        Self { state: self.state.clone(), api: Arc::clone(&self.api) }
    }
}

impl<C: StoreCell<ProjectsState>> ProjectsStore<C> {
    pub fn new(state: C, api: Arc<dyn DashboardApi>) -> Self {
        Self { state, api }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    /// Run one request with the shared loading/error bookkeeping, applying
    /// `apply` to the state only when the request succeeds.
    async fn request<T>(
        &self,
        what: &str,
        fut: impl Future<Output = Result<T, ApiError>>,
        apply: impl FnOnce(&mut ProjectsState, T),
    ) -> Result<(), ApiError> {
        self.state.update_state(ProjectsState::begin_request);
        let outcome = match fut.await {
            Ok(value) => {
                self.state.update_state(|s| apply(s, value));
                Ok(())
            }
            Err(err) => {
                log::warn!("projects: {what} failed: {err}");
                self.state.update_state(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        };
        self.state.update_state(|s| s.loading = false);
        outcome
    }

    /// Load the full project inventory.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn fetch_projects(&self) -> Result<(), ApiError> {
        self.request("fetch projects", self.api.list_projects(), |s, projects| s.projects = projects).await
    }

    /// Load one project and make it the selected project.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn fetch_project_by_id(&self, id: i64) -> Result<(), ApiError> {
        self.request("fetch project", self.api.get_project(id), |s, project| {
            s.selected_project = Some(project.clone());
            s.upsert(project);
        })
        .await
    }

    /// Load up to `limit` recent commits of a project.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn fetch_commits(&self, project_id: i64, limit: usize) -> Result<(), ApiError> {
        self.request("fetch commits", self.api.list_commits(project_id, limit), |s, commits| {
            s.recent_commits = commits;
        })
        .await
    }

    /// Flip a project's blocked flag.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also left in `error`.
    pub async fn toggle_project_lock(&self, project_id: i64) -> Result<(), ApiError> {
        self.request("toggle project lock", self.api.toggle_project_lock(project_id), ProjectsState::upsert).await
    }

    pub fn set_selected_project(&self, project: Option<Project>) {
        self.state.update_state(|s| s.selected_project = project);
    }

    pub fn clear_error(&self) {
        self.state.update_state(|s| s.error = None);
    }
}
