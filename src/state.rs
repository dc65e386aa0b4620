//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool and the deployment label; both are cheap to clone.

use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub environment: String,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, environment: impl Into<String>) -> Self {
        Self { pool, environment: environment.into() }
    }
}
