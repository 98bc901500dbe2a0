use crate::{errors::ServiceError, AppState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::time::Instant;

pub const SERVICE_NAME: &str = "BMS Assistant API";

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(liveness_check))
        .route("/health/ready", get(readiness_check))
}

async fn home() -> impl IntoResponse {
    Json(json!({
        "message": "BMS Assistant API - Sistema de Gestión Documental con IA",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "Activo"
    }))
}

/// Liveness probe. Never touches the database.
async fn liveness_check() -> impl IntoResponse {
    Json(json!({
        "status": "UP",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": SERVICE_NAME
    }))
}

/// Readiness probe: 503 while the database does not answer a ping.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let db_result = crate::db::check_connection(&state.db).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    readiness_report(db_result, latency_ms)
}

fn readiness_report(
    db_result: Result<(), ServiceError>,
    latency_ms: u64,
) -> (StatusCode, Json<Value>) {
    match db_result {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": {
                    "database": { "status": "up", "latency_ms": latency_ms }
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": {
                    "database": { "status": "down", "error": e.response_message() }
                }
            })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, RuntimeErr};

    #[test]
    fn unreachable_database_is_reported_without_driver_details() {
        let err = ServiceError::DatabaseError(DbErr::Conn(RuntimeErr::Internal(
            "connection refused at 10.0.0.5:5432 for user bms".into(),
        )));

        let (status, Json(body)) = readiness_report(Err(err), 3);

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not_ready");
        assert_eq!(body["checks"]["database"]["error"], "Database error");
        assert!(!body.to_string().contains("10.0.0.5"));
    }

    #[test]
    fn reachable_database_is_ready() {
        let (status, Json(body)) = readiness_report(Ok(()), 7);

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["database"]["latency_ms"], 7);
    }
}
