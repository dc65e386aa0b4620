//! `users` table access.
//!
//! Queries are built at runtime with `query_as` so the crate compiles without
//! a live database; rows decode through [`UserRecord`].

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use lumastack_client::net::types::{User, UserRole};
use sqlx::PgPool;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,
    #[error("user already exists: {0}")]
    AlreadyExists(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One `users` row, password hash included. Never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub telegram_user_id: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields needed to insert a user; the hash is passed separately.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, is_active, telegram_user_id, created_at, updated_at";

/// Column value stored for a role.
#[must_use]
pub fn role_column(role: UserRole) -> &'static str {
    match role {
        UserRole::User => "user",
        UserRole::Admin => "admin",
    }
}

fn format_ts(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_default()
}

impl UserRecord {
    /// Role column decoded; unknown values fall back to the least privilege.
    #[must_use]
    pub fn role(&self) -> UserRole {
        if self.role == "admin" { UserRole::Admin } else { UserRole::User }
    }

    /// Public view of the row, as the dashboard consumes it.
    #[must_use]
    pub fn to_api_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role(),
            telegram_user_id: self.telegram_user_id.clone(),
            created_at: format_ts(self.created_at),
            updated_at: format_ts(self.updated_at),
        }
    }
}

/// Insert a user.
///
/// # Errors
///
/// [`UserError::AlreadyExists`] when the username or email is taken,
/// [`UserError::Database`] for anything else.
pub async fn create_user(pool: &PgPool, user: &NewUser, password_hash: &str) -> Result<UserRecord, UserError> {
    let sql = format!(
        "INSERT INTO users (username, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
    );
    let result = sqlx::query_as::<_, UserRecord>(&sql)
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(role_column(user.role))
        .fetch_one(pool)
        .await;

    match result {
        Ok(record) => Ok(record),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(UserError::AlreadyExists(db_err.message().to_owned()))
        }
        Err(e) => Err(UserError::Database(e)),
    }
}

async fn find_one(pool: &PgPool, column: &str, value: &str) -> Result<UserRecord, UserError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
    sqlx::query_as::<_, UserRecord>(&sql)
        .bind(value)
        .fetch_optional(pool)
        .await?
        .ok_or(UserError::NotFound)
}

/// # Errors
///
/// [`UserError::NotFound`] when no row matches.
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<UserRecord, UserError> {
    find_one(pool, "email", email).await
}

/// # Errors
///
/// [`UserError::NotFound`] when no row matches.
pub async fn find_user_by_username(pool: &PgPool, username: &str) -> Result<UserRecord, UserError> {
    find_one(pool, "username", username).await
}
