//! Note handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::NoteResponse;
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, Created, IdResponse, NoContent};

/// Note create/update payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NoteRequest {
    #[schema(example = "Groceries")]
    pub title: String,
    #[schema(example = "milk, eggs")]
    pub content: String,
    #[schema(example = json!(["shop"]), max_items = 3)]
    pub tags: Option<Vec<String>>,
}

/// Target folder; `null` takes the note out of its folder
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MoveNoteRequest {
    #[schema(example = 3)]
    pub folder_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Phrase matched against title, content and tags
    pub query: Option<String>,
}

pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", post(create_note))
        .route("/notes/favorites", get(get_favorite_notes))
        .route("/notes/search", get(search_notes))
        .route("/notes/:id", put(update_note).delete(delete_note))
        .route("/notes/:id/move", put(move_note))
        .route(
            "/notes/:id/favorites",
            put(add_to_favorites).delete(delete_from_favorites),
        )
}

/// Create a note
#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "Notes",
    security(("bearer_auth" = [])),
    request_body = NoteRequest,
    responses(
        (status = 201, description = "Note created", body = IdResponse),
        (status = 400, description = "Invalid note or duplicate title"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_note(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NoteRequest>,
) -> AppResult<Created<IdResponse>> {
    let id = state
        .note_service
        .create_note(
            current_user.id,
            &payload.title,
            &payload.content,
            payload.tags,
        )
        .await?;

    Ok(Created(IdResponse::from(id)))
}

/// Replace title, content and tags of a note
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    tag = "Notes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Note ID")),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note updated"),
        (status = 400, description = "Invalid note or duplicate title"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn update_note(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<NoteRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .note_service
        .update_note(
            current_user.id,
            id,
            &payload.title,
            &payload.content,
            payload.tags,
        )
        .await?;

    Ok(Json(ApiResponse::message("Note updated")))
}

/// Delete a note
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    tag = "Notes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Note ID")),
    responses(
        (status = 204, description = "Note deleted or already absent"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_note(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.note_service.delete_note(current_user.id, id).await?;
    Ok(NoContent)
}

/// Move a note into a folder or out of it
#[utoipa::path(
    put,
    path = "/api/notes/{id}/move",
    tag = "Notes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Note ID")),
    request_body = MoveNoteRequest,
    responses(
        (status = 200, description = "Note moved"),
        (status = 404, description = "Note or folder not found")
    )
)]
pub async fn move_note(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<MoveNoteRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .note_service
        .move_to_folder(current_user.id, id, payload.folder_id)
        .await?;

    Ok(Json(ApiResponse::message("Note moved")))
}

/// Mark a note as favorite
#[utoipa::path(
    put,
    path = "/api/notes/{id}/favorites",
    tag = "Notes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note added to favorites"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn add_to_favorites(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.note_service.add_to_favorites(current_user.id, id).await?;
    Ok(Json(ApiResponse::message("Note added to favorites")))
}

/// Unmark a favorite note
#[utoipa::path(
    delete,
    path = "/api/notes/{id}/favorites",
    tag = "Notes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note removed from favorites"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn delete_from_favorites(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .note_service
        .delete_from_favorites(current_user.id, id)
        .await?;
    Ok(Json(ApiResponse::message("Note removed from favorites")))
}

/// List favorite notes
#[utoipa::path(
    get,
    path = "/api/notes/favorites",
    tag = "Notes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Favorite notes", body = Vec<NoteResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_favorite_notes(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<NoteResponse>>>> {
    let notes = state.note_service.get_favorite_notes(current_user.id).await?;
    Ok(Json(ApiResponse::success(notes)))
}

/// Search notes by phrase
#[utoipa::path(
    get,
    path = "/api/notes/search",
    tag = "Notes",
    security(("bearer_auth" = [])),
    params(SearchParams),
    responses(
        (status = 200, description = "Matching notes", body = Vec<NoteResponse>),
        (status = 400, description = "Missing or empty query")
    )
)]
pub async fn search_notes(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<NoteResponse>>>> {
    let query = params
        .query
        .filter(|query| !query.is_empty())
        .ok_or_else(|| AppError::validation("Search query cannot be empty"))?;

    let notes = state
        .note_service
        .find_notes_by_query_phrase(current_user.id, &query)
        .await?;

    Ok(Json(ApiResponse::success(notes)))
}
