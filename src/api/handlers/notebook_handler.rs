//! Notebook handler.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Notebook;
use crate::errors::AppResult;
use crate::types::ApiResponse;

pub fn notebook_routes() -> Router<AppState> {
    Router::new().route("/notebook", get(get_notebook))
}

/// Folders with their notes, plus unfiled notes
#[utoipa::path(
    get,
    path = "/api/notebook",
    tag = "Notebook",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's notebook", body = Notebook),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_notebook(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Notebook>>> {
    let notebook = state
        .notebook_service
        .get_user_notebook(current_user.id)
        .await?;

    Ok(Json(ApiResponse::success(notebook)))
}
