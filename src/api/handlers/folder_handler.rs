//! Folder handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, IdResponse, NoContent};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FolderRequest {
    #[schema(example = "Work")]
    pub title: String,
}

pub fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folder", post(create_folder))
        .route("/folder/:id", put(update_folder).delete(delete_folder))
}

/// Create a folder
#[utoipa::path(
    post,
    path = "/api/folder",
    tag = "Folders",
    security(("bearer_auth" = [])),
    request_body = FolderRequest,
    responses(
        (status = 201, description = "Folder created", body = IdResponse),
        (status = 400, description = "Empty or duplicate title"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_folder(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FolderRequest>,
) -> AppResult<Created<IdResponse>> {
    let id = state
        .folder_service
        .create_folder(current_user.id, &payload.title)
        .await?;

    Ok(Created(IdResponse::from(id)))
}

/// Rename a folder
#[utoipa::path(
    put,
    path = "/api/folder/{id}",
    tag = "Folders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Folder ID")),
    request_body = FolderRequest,
    responses(
        (status = 200, description = "Folder updated"),
        (status = 400, description = "Empty or duplicate title"),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn update_folder(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<FolderRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .folder_service
        .update_folder(current_user.id, id, &payload.title)
        .await?;

    Ok(Json(ApiResponse::message("Folder updated")))
}

/// Delete a folder. Its notes become unfiled.
#[utoipa::path(
    delete,
    path = "/api/folder/{id}",
    tag = "Folders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Folder ID")),
    responses(
        (status = 204, description = "Folder deleted or already absent"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_folder(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.folder_service.delete_folder(current_user.id, id).await?;
    Ok(NoContent)
}
