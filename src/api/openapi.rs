//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, folder_handler, note_handler, notebook_handler, user_handler,
};
use crate::domain::{FolderResponse, NoteResponse, Notebook, UserResponse};
use crate::services::TokenResponse;
use crate::types::IdResponse;

/// OpenAPI documentation for the Notes API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes API",
        version = "0.1.0",
        description = "Personal note-taking backend: users, folders and notes",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        // User endpoints
        user_handler::create_user,
        user_handler::get_current_user,
        user_handler::update_current_user,
        user_handler::delete_current_user,
        // Folder endpoints
        folder_handler::create_folder,
        folder_handler::update_folder,
        folder_handler::delete_folder,
        // Note endpoints
        note_handler::create_note,
        note_handler::update_note,
        note_handler::delete_note,
        note_handler::move_note,
        note_handler::add_to_favorites,
        note_handler::delete_from_favorites,
        note_handler::get_favorite_notes,
        note_handler::search_notes,
        // Notebook
        notebook_handler::get_notebook,
    ),
    components(
        schemas(
            UserResponse,
            FolderResponse,
            NoteResponse,
            Notebook,
            IdResponse,
            TokenResponse,
            auth_handler::LoginRequest,
            user_handler::UserRequest,
            folder_handler::FolderRequest,
            note_handler::NoteRequest,
            note_handler::MoveNoteRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login"),
        (name = "Users", description = "Registration and the caller's own account"),
        (name = "Folders", description = "Folder management"),
        (name = "Notes", description = "Note management, favorites and search"),
        (name = "Notebook", description = "Folders and notes as one tree")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_note_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/notes/{id}/favorites"));
        assert!(paths.contains_key("/api/notebook"));
        assert!(paths.contains_key("/api/auth/login"));
    }
}
