//! `GET /api` service description and `GET /health` probe.

#[cfg(test)]
#[path = "info_test.rs"]
mod info_test;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::db;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "LumaStack API";
pub const SERVICE_DESCRIPTION: &str = "Platform for monitoring and managing Git repositories with Telegram integration";

const FEATURES: [&str; 4] = [
    "Git repository monitoring",
    "User authentication",
    "Telegram notifications",
    "Real-time updates via WebSockets",
];

/// Body of `GET /api`.
#[must_use]
pub fn service_info_body(environment: &str, now: OffsetDateTime) -> Value {
    json!({
        "name": SERVICE_NAME,
        "description": SERVICE_DESCRIPTION,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "timestamp": now.format(&Rfc3339).unwrap_or_default(),
        "environment": environment,
        "endpoints": {
            "info": "GET /api",
            "health": "GET /health",
            "liveness": "GET /healthz",
        },
        "features": FEATURES,
    })
}

pub async fn service_info(State(state): State<AppState>) -> Json<Value> {
    Json(service_info_body(&state.environment, OffsetDateTime::now_utc()))
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

impl HealthReport {
    #[must_use]
    pub fn new(database_ok: bool) -> Self {
        Self {
            status: "ok",
            database: if database_ok { "healthy" } else { "unhealthy" },
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Reports process liveness plus a `SELECT 1` database probe. Always 200;
/// monitors read the `database` field.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::new(db::ping(&state.pool).await))
}
