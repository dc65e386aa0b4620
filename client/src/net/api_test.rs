use super::*;
use futures::executor::block_on;

#[test]
fn not_implemented_message_matches_placeholder_text() {
    assert_eq!(ApiError::NotImplemented.to_string(), "API not implemented yet");
}

#[test]
fn http_error_formats_status_and_message() {
    let err = ApiError::Http { status: 503, message: "unavailable".to_owned() };
    assert_eq!(err.to_string(), "request failed: 503 unavailable");
}

#[test]
fn auth_failure_covers_unauthorized_and_401() {
    assert!(ApiError::Unauthorized.is_auth_failure());
    assert!(ApiError::Http { status: 401, message: String::new() }.is_auth_failure());
    assert!(!ApiError::Http { status: 500, message: String::new() }.is_auth_failure());
    assert!(!ApiError::NotImplemented.is_auth_failure());
}

#[test]
fn pending_api_fails_every_call_with_not_implemented() {
    let api = PendingApi;
    let credentials = LoginCredentials { username: "ada".to_owned(), password: "Secret123".to_owned() };
    assert_eq!(block_on(api.login(&credentials)), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.login_with_telegram("https://t.me/x")), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.refresh_token("r")), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.current_user("t")), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.list_projects()), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.get_project(1)), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.list_commits(1, DEFAULT_COMMIT_LIMIT)), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.toggle_project_lock(1)), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.list_notifications()), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.mark_notification_read(1)), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.mark_all_notifications_read()), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.delete_notification(1)), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.list_scripts()), Err(ApiError::NotImplemented));
    assert_eq!(block_on(api.list_script_executions(1)), Err(ApiError::NotImplemented));
}
