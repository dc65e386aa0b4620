use super::*;
use crate::state::test_helpers::test_app_state;

#[test]
fn service_info_lists_required_fields() {
    let body = service_info_body("staging", OffsetDateTime::UNIX_EPOCH);
    assert_eq!(body["name"], SERVICE_NAME);
    assert_eq!(body["status"], "operational");
    assert_eq!(body["environment"], "staging");
    assert_eq!(body["timestamp"], "1970-01-01T00:00:00Z");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["endpoints"]["health"], "GET /health");
    assert_eq!(body["features"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn service_info_handler_reports_state_environment() {
    let Json(body) = service_info(State(test_app_state())).await;
    assert_eq!(body["environment"], "test");
    assert!(body["timestamp"].as_str().is_some_and(|ts| !ts.is_empty()));
}

#[test]
fn health_report_maps_probe_result() {
    assert_eq!(HealthReport::new(true).database, "healthy");
    assert_eq!(HealthReport::new(false).database, "unhealthy");
    assert_eq!(HealthReport::new(false).status, "ok");
}

#[tokio::test]
async fn health_reports_unreachable_database() {
    let Json(report) = health(State(test_app_state())).await;
    assert_eq!(report, HealthReport::new(false));
}

#[test]
fn health_report_serializes_flat() {
    let json = serde_json::to_value(HealthReport::new(true)).unwrap();
    assert_eq!(json, serde_json::json!({"status": "ok", "database": "healthy", "version": env!("CARGO_PKG_VERSION")}));
}
