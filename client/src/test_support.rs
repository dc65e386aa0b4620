//! Shared fixtures and a scripted `DashboardApi` for store tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::net::api::{ApiError, DashboardApi};
use crate::net::types::{
    AuthResponse, Commit, ExecutionStatus, LoginCredentials, Notification, NotificationKind, Project, Script,
    ScriptExecution, User, UserRole,
};

const TS: &str = "2025-10-21T03:15:42Z";

pub fn user(role: UserRole) -> User {
    User {
        id: 1,
        username: "ada".to_owned(),
        email: "ada@example.com".to_owned(),
        role,
        telegram_user_id: None,
        created_at: TS.to_owned(),
        updated_at: TS.to_owned(),
    }
}

pub fn auth_response(role: UserRole) -> AuthResponse {
    AuthResponse { user: user(role), token: "access-1".to_owned(), refresh_token: "refresh-1".to_owned() }
}

pub fn project(id: i64, is_blocked: bool) -> Project {
    Project {
        id,
        name: format!("project-{id}"),
        path: format!("/srv/git/project-{id}"),
        description: None,
        is_blocked,
        last_commit_hash: None,
        last_pull_at: None,
        created_at: TS.to_owned(),
        updated_at: TS.to_owned(),
    }
}

pub fn commit(hash: &str) -> Commit {
    Commit { hash: hash.to_owned(), author: "ada".to_owned(), date: TS.to_owned(), message: format!("commit {hash}") }
}

pub fn notification(id: i64, is_read: bool) -> Notification {
    Notification {
        id,
        user_id: 1,
        project_id: Some(1),
        kind: NotificationKind::Commit,
        title: format!("notification {id}"),
        message: "new commit pushed".to_owned(),
        is_read,
        created_at: TS.to_owned(),
    }
}

pub fn script(id: i64, is_global: bool) -> Script {
    Script {
        id,
        name: format!("script-{id}"),
        description: None,
        content: "echo ok".to_owned(),
        is_global,
        project_id: if is_global { None } else { Some(1) },
        created_by: 1,
        created_at: TS.to_owned(),
        updated_at: TS.to_owned(),
    }
}

pub fn execution(id: i64, script_id: i64, status: ExecutionStatus) -> ScriptExecution {
    ScriptExecution {
        id,
        script_id,
        executed_by: 1,
        status,
        output: None,
        error: None,
        started_at: TS.to_owned(),
        finished_at: None,
    }
}

/// API double answering from canned data. When `failure` is set, every call
/// fails with it. Each call is recorded by name.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub failure: Option<ApiError>,
    pub auth: Option<AuthResponse>,
    pub user: Option<User>,
    pub projects: Vec<Project>,
    pub commits: Vec<Commit>,
    pub notifications: Vec<Notification>,
    pub scripts: Vec<Script>,
    pub executions: Vec<ScriptExecution>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn failing(err: ApiError) -> Self {
        Self { failure: Some(err), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call.to_owned());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Http { status: 404, message: "not found".to_owned() }
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        self.record("login")?;
        self.auth.clone().ok_or(ApiError::Unauthorized)
    }

    async fn login_with_telegram(&self, _magic_link: &str) -> Result<AuthResponse, ApiError> {
        self.record("login_with_telegram")?;
        self.auth.clone().ok_or(ApiError::Unauthorized)
    }

    async fn refresh_token(&self, _refresh_token: &str) -> Result<AuthResponse, ApiError> {
        self.record("refresh_token")?;
        self.auth.clone().ok_or(ApiError::Unauthorized)
    }

    async fn current_user(&self, _token: &str) -> Result<User, ApiError> {
        self.record("current_user")?;
        self.user.clone().ok_or(ApiError::Unauthorized)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.record("list_projects")?;
        Ok(self.projects.clone())
    }

    async fn get_project(&self, id: i64) -> Result<Project, ApiError> {
        self.record("get_project")?;
        self.projects.iter().find(|p| p.id == id).cloned().ok_or_else(Self::not_found)
    }

    async fn list_commits(&self, _project_id: i64, limit: usize) -> Result<Vec<Commit>, ApiError> {
        self.record("list_commits")?;
        Ok(self.commits.iter().take(limit).cloned().collect())
    }

    async fn toggle_project_lock(&self, project_id: i64) -> Result<Project, ApiError> {
        self.record("toggle_project_lock")?;
        let mut project = self.projects.iter().find(|p| p.id == project_id).cloned().ok_or_else(Self::not_found)?;
        project.is_blocked = !project.is_blocked;
        Ok(project)
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.record("list_notifications")?;
        Ok(self.notifications.clone())
    }

    async fn mark_notification_read(&self, _id: i64) -> Result<(), ApiError> {
        self.record("mark_notification_read")
    }

    async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.record("mark_all_notifications_read")
    }

    async fn delete_notification(&self, _id: i64) -> Result<(), ApiError> {
        self.record("delete_notification")
    }

    async fn list_scripts(&self) -> Result<Vec<Script>, ApiError> {
        self.record("list_scripts")?;
        Ok(self.scripts.clone())
    }

    async fn list_script_executions(&self, script_id: i64) -> Result<Vec<ScriptExecution>, ApiError> {
        self.record("list_script_executions")?;
        Ok(self.executions.iter().filter(|e| e.script_id == script_id).cloned().collect())
    }
}
