use super::*;

fn user_json(role: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "username": "ada",
        "email": "ada@example.com",
        "role": role,
        "created_at": "2025-10-21T03:15:42Z",
        "updated_at": "2025-10-21T03:15:42Z"
    })
}

// =============================================================
// User
// =============================================================

#[test]
fn user_role_deserializes_lowercase() {
    let user: User = serde_json::from_value(user_json("admin")).unwrap();
    assert_eq!(user.role, UserRole::Admin);
    assert!(user.is_admin());
    assert_eq!(user.telegram_user_id, None);
}

#[test]
fn user_role_default_is_user() {
    assert_eq!(UserRole::default(), UserRole::User);
}

#[test]
fn user_role_display_matches_wire_name() {
    assert_eq!(UserRole::User.to_string(), "user");
    assert_eq!(UserRole::Admin.to_string(), "admin");
}

#[test]
fn user_rejects_unknown_role() {
    assert!(serde_json::from_value::<User>(user_json("root")).is_err());
}

#[test]
fn user_omits_missing_telegram_id_when_serialized() {
    let user: User = serde_json::from_value(user_json("user")).unwrap();
    let value = serde_json::to_value(&user).unwrap();
    assert!(value.get("telegram_user_id").is_none());
}

// =============================================================
// Projects
// =============================================================

#[test]
fn project_file_uses_type_field() {
    let file: ProjectFile = serde_json::from_value(serde_json::json!({
        "name": "src",
        "path": "src",
        "type": "directory"
    }))
    .unwrap();
    assert_eq!(file.kind, FileKind::Directory);
    assert_eq!(file.size, None);
}

#[test]
fn commit_short_hash_truncates_to_seven() {
    let commit = Commit {
        hash: "0123456789abcdef".to_owned(),
        author: "ada".to_owned(),
        date: "2025-10-21".to_owned(),
        message: "init".to_owned(),
    };
    assert_eq!(commit.short_hash(), "0123456");
}

#[test]
fn commit_short_hash_keeps_short_values() {
    let commit = Commit {
        hash: "abc".to_owned(),
        author: "ada".to_owned(),
        date: "2025-10-21".to_owned(),
        message: "init".to_owned(),
    };
    assert_eq!(commit.short_hash(), "abc");
}

// =============================================================
// Notifications + envelopes
// =============================================================

#[test]
fn notification_kind_uses_snake_case() {
    let notification: Notification = serde_json::from_value(serde_json::json!({
        "id": 1,
        "user_id": 7,
        "type": "script_execution",
        "title": "Deploy finished",
        "message": "deploy.sh completed",
        "is_read": false,
        "created_at": "2025-10-21T03:15:42Z"
    }))
    .unwrap();
    assert_eq!(notification.kind, NotificationKind::ScriptExecution);
    assert_eq!(notification.project_id, None);
}

#[test]
fn execution_status_parses_all_variants() {
    for (raw, expected) in [
        ("running", ExecutionStatus::Running),
        ("completed", ExecutionStatus::Completed),
        ("failed", ExecutionStatus::Failed),
    ] {
        let parsed: ExecutionStatus = serde_json::from_value(serde_json::json!(raw)).unwrap();
        assert_eq!(parsed, expected);
    }
}

#[test]
fn paginated_response_reports_next_page() {
    let page = PaginatedResponse::<i64> { data: vec![1, 2], total: 5, page: 1, page_size: 2, total_pages: 3 };
    assert!(page.has_next_page());
    let last = PaginatedResponse::<i64> { data: vec![5], total: 5, page: 3, page_size: 2, total_pages: 3 };
    assert!(!last.has_next_page());
}

#[test]
fn ws_message_reads_type_discriminator() {
    let message: WsMessage = serde_json::from_value(serde_json::json!({
        "type": "script_status",
        "data": { "id": 3 }
    }))
    .unwrap();
    assert_eq!(message.kind, WsMessageKind::ScriptStatus);
    assert_eq!(message.data["id"], 3);
}
