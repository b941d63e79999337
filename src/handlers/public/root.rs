// handlers/public/root.rs - GET /, GET /ping, GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::middleware::ApiResponse;
use crate::state::AppState;

pub async fn index() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "HRMS API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "account": "/account/login, /account/quit (public)",
            "company": "/company/query (public)",
            "features": "/depart, /rank, /staff, /password, /authority, /notification, /salary, \
                         /salary_record, /attendance_record, /recruitment, /candidate (identity cookie)",
        }
    }))
}

pub async fn ping() -> ApiResponse<&'static str> {
    ApiResponse::success("pong")
}

/// Pings every tenant pool. Reports how many tenants exist but never their names.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let stats = state.resolver.stats();
    let tenants = state.registry().len();

    match state.registry().health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "tenants": tenants,
                    "resolver": stats,
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": true,
                    "message": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "tenants": tenants,
                    }
                })),
            )
        }
    }
}
