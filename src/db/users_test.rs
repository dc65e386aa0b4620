use super::*;
use crate::state::test_helpers::test_app_state;

fn record(role: &str) -> UserRecord {
    UserRecord {
        id: 7,
        username: "root".to_owned(),
        email: "root@example.com".to_owned(),
        password_hash: "$argon2id$...".to_owned(),
        role: role.to_owned(),
        is_active: true,
        telegram_user_id: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[test]
fn role_column_matches_check_constraint() {
    assert_eq!(role_column(UserRole::User), "user");
    assert_eq!(role_column(UserRole::Admin), "admin");
}

#[test]
fn unknown_role_decodes_as_user() {
    assert_eq!(record("admin").role(), UserRole::Admin);
    assert_eq!(record("superuser").role(), UserRole::User);
}

#[test]
fn api_user_omits_hash_and_formats_timestamps() {
    let user = record("admin").to_api_user();
    assert_eq!(user.id, 7);
    assert!(user.is_admin());
    assert_eq!(user.created_at, "1970-01-01T00:00:00Z");
    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("argon2"));
}

#[tokio::test]
async fn lookups_surface_database_errors() {
    let state = test_app_state();
    let err = find_user_by_email(&state.pool, "root@example.com").await.unwrap_err();
    assert!(matches!(err, UserError::Database(_)));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn create_then_find_round_trip() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
    let pool = crate::db::init_pool(&url, 2).await.unwrap();
    let suffix = std::process::id();
    let new_user = NewUser {
        username: format!("live_{suffix}"),
        email: format!("live_{suffix}@example.com"),
        role: UserRole::Admin,
    };

    let created = create_user(&pool, &new_user, "hash").await.unwrap();
    assert_eq!(created.role(), UserRole::Admin);
    assert_eq!(find_user_by_username(&pool, &new_user.username).await.unwrap().id, created.id);
    assert!(matches!(create_user(&pool, &new_user, "hash").await, Err(UserError::AlreadyExists(_))));

    sqlx::query("DELETE FROM users WHERE id = $1").bind(created.id).execute(&pool).await.unwrap();
}
