//! Health check handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::api::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: StorageHealth,
}

/// Storage backend health with optional error message.
#[derive(Debug, Serialize)]
pub struct StorageHealth {
    pub backend: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint. Pings the database when one is configured.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let storage = match &state.database {
        Some(database) => match database.ping().await {
            Ok(()) => StorageHealth {
                backend: "postgres",
                status: "healthy",
                error: None,
            },
            Err(e) => StorageHealth {
                backend: "postgres",
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        },
        None => StorageHealth {
            backend: "file",
            status: "healthy",
            error: None,
        },
    };

    let healthy = storage.status == "healthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        storage,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response)).into_response()
}
