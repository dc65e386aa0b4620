use super::*;
use crate::net::types::ExecutionStatus;
use crate::test_support::{execution, notification, project};

#[test]
fn summary_counts_each_store() {
    let projects = ProjectsState { projects: vec![project(1, false), project(2, true), project(3, true)], ..ProjectsState::default() };
    let notifications =
        NotificationsState { notifications: vec![notification(1, false), notification(2, true)], ..NotificationsState::default() };
    let scripts = ScriptsState {
        executions: vec![
            execution(1, 1, ExecutionStatus::Running),
            execution(2, 1, ExecutionStatus::Failed),
            execution(3, 2, ExecutionStatus::Running),
        ],
        ..ScriptsState::default()
    };

    let summary = DashboardSummary::collect(&projects, &notifications, &scripts);
    assert_eq!(
        summary,
        DashboardSummary { projects: 3, blocked_projects: 2, unread_notifications: 1, running_executions: 2 }
    );
}

#[test]
fn summary_of_empty_stores_is_zero() {
    let summary =
        DashboardSummary::collect(&ProjectsState::default(), &NotificationsState::default(), &ScriptsState::default());
    assert_eq!(summary, DashboardSummary::default());
}

#[test]
fn greeting_uses_username_when_known() {
    assert_eq!(greeting(Some("ada")), "Welcome back, ada");
    assert_eq!(greeting(None), "Welcome");
}
