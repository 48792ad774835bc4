//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::{AppError, ErrorKind};

/// Authenticated user extracted from JWT token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
}

/// JWT authentication middleware.
///
/// Extracts and validates the bearer token, then injects the CurrentUser
/// into the request extensions. The same value is copied onto the
/// response so outer layers can log who made the call.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::auth("Missing authorization header"))?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or_else(|| AppError::auth("Authorization header must use the Bearer scheme"))?;

    // A token whose subject no longer exists is as good as no token
    let claims = state
        .auth_service
        .verify_token(token)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::Auth | ErrorKind::NotFound => {
                tracing::debug!("Token rejected: {}", e);
                AppError::auth("Invalid or expired token")
            }
            _ => e,
        })?;

    let current_user = CurrentUser { id: claims.sub };
    request.extensions_mut().insert(current_user);

    let mut response = next.run(request).await;
    response.extensions_mut().insert(current_user);
    Ok(response)
}
