//! API seam between the stores and the dashboard backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stores talk to the backend only through [`DashboardApi`]. The backend has
//! not published its endpoints yet, so the application wires in
//! [`PendingApi`], which fails every call with [`ApiError::NotImplemented`].
//! Tests substitute their own implementations.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; the stores forward that error to
//! their callers unchanged.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{AuthResponse, Commit, LoginCredentials, Notification, Project, Script, ScriptExecution, User};

/// Default number of commits requested for a project's recent history.
pub const DEFAULT_COMMIT_LIMIT: usize = 10;

/// Failure of a dashboard API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend endpoint for this call does not exist yet.
    #[error("API not implemented yet")]
    NotImplemented,
    #[error("unauthorized")]
    Unauthorized,
    #[error("request failed: {status} {message}")]
    Http { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the failure means the held credentials are no longer valid.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Http { status: 401, .. })
    }
}

/// Remote operations backing the dashboard stores, one per backend call.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError>;

    async fn login_with_telegram(&self, magic_link: &str) -> Result<AuthResponse, ApiError>;

    /// Exchange a refresh token for a fresh token pair.
    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResponse, ApiError>;

    /// Resolve the user owning `token`.
    async fn current_user(&self, token: &str) -> Result<User, ApiError>;

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    async fn get_project(&self, id: i64) -> Result<Project, ApiError>;

    async fn list_commits(&self, project_id: i64, limit: usize) -> Result<Vec<Commit>, ApiError>;

    /// Flip a project's blocked flag, returning the updated project.
    async fn toggle_project_lock(&self, project_id: i64) -> Result<Project, ApiError>;

    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError>;

    async fn mark_notification_read(&self, id: i64) -> Result<(), ApiError>;

    async fn mark_all_notifications_read(&self) -> Result<(), ApiError>;

    async fn delete_notification(&self, id: i64) -> Result<(), ApiError>;

    async fn list_scripts(&self) -> Result<Vec<Script>, ApiError>;

    async fn list_script_executions(&self, script_id: i64) -> Result<Vec<ScriptExecution>, ApiError>;
}

/// Backend stand-in used until the HTTP API exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct PendingApi;

#[async_trait]
impl DashboardApi for PendingApi {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn login_with_telegram(&self, _magic_link: &str) -> Result<AuthResponse, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn refresh_token(&self, _refresh_token: &str) -> Result<AuthResponse, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn current_user(&self, _token: &str) -> Result<User, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn get_project(&self, _id: i64) -> Result<Project, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn list_commits(&self, _project_id: i64, _limit: usize) -> Result<Vec<Commit>, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn toggle_project_lock(&self, _project_id: i64) -> Result<Project, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn mark_notification_read(&self, _id: i64) -> Result<(), ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn delete_notification(&self, _id: i64) -> Result<(), ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn list_scripts(&self) -> Result<Vec<Script>, ApiError> {
        Err(ApiError::NotImplemented)
    }

    async fn list_script_executions(&self, _script_id: i64) -> Result<Vec<ScriptExecution>, ApiError> {
        Err(ApiError::NotImplemented)
    }
}
