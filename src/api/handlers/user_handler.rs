//! User handlers. Every protected route acts on the caller's own account.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, IdResponse, NoContent};

/// Registration and profile update payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[schema(example = "johndoe42", min_length = 8)]
    pub login: String,
    #[schema(example = "Password1234$", min_length = 10)]
    pub password: String,
    #[schema(example = "John")]
    pub name: String,
    #[schema(example = "Doe")]
    pub surname: String,
}

/// Public registration route
pub fn registration_routes() -> Router<AppState> {
    Router::new().route("/user", post(create_user))
}

/// Routes for the authenticated caller
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/user",
        get(get_current_user)
            .put(update_current_user)
            .delete(delete_current_user),
    )
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/user",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User registered", body = IdResponse),
        (status = 400, description = "Validation error or login already taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Created<IdResponse>> {
    let id = state
        .user_service
        .create_user(
            &payload.login,
            &payload.password,
            &payload.name,
            &payload.surname,
        )
        .await?;

    Ok(Created(IdResponse::from(id)))
}

/// Get current authenticated user
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_user(current_user.id).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Replace the caller's login, password, name and surname
#[utoipa::path(
    put,
    path = "/api/user",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Validation error or login already taken"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .user_service
        .update_user(
            current_user.id,
            &payload.login,
            &payload.password,
            &payload.name,
            &payload.surname,
        )
        .await?;

    Ok(Json(ApiResponse::message("User updated")))
}

/// Delete the caller's account
#[utoipa::path(
    delete,
    path = "/api/user",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(current_user.id).await?;
    Ok(NoContent)
}
