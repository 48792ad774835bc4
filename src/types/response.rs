//! Response envelopes shared by all handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Id of a freshly created entity
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct IdResponse {
    #[schema(example = 1)]
    pub id: i32,
}

impl From<i32> for IdResponse {
    fn from(id: i32) -> Self {
        Self { id }
    }
}

/// Created response helper for POST endpoints
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(ApiResponse::success(self.0))).into_response()
    }
}

/// No content response helper for DELETE endpoints
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> axum::response::Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_omits_message() {
        let json = serde_json::to_value(ApiResponse::success(IdResponse::from(3))).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": { "id": 3 } }));
    }

    #[test]
    fn test_message_only_response() {
        let json = serde_json::to_value(ApiResponse::message("Folder updated")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "message": "Folder updated" })
        );
    }

    #[test]
    fn test_created_status() {
        let response = Created(IdResponse::from(1)).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
