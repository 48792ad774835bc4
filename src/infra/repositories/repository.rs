//! Storage contract consumed by the services.

use async_trait::async_trait;

use crate::domain::{AnyEntity, Folder, Note, User};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Repository trait for dependency injection.
///
/// Scoped getters report a record owned by another user as NotFound.
/// Listing failures surface as errors, never as an empty list.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    /// Insert when the id is 0, otherwise update in place. Refreshes the
    /// timestamp and returns the persisted id.
    async fn save_entity(&self, entity: AnyEntity) -> AppResult<i32>;

    /// Remove the entity with the same id, if present. A user takes their
    /// folders and notes along; a folder's notes become unfiled.
    async fn delete_entity(&self, entity: AnyEntity) -> AppResult<()>;

    async fn get_user_by_id(&self, id: i32) -> AppResult<User>;

    /// Look up by login and verify the plaintext password against the
    /// stored hash. Unknown login and wrong password are both NotFound.
    async fn get_user(&self, login: &str, password: &str) -> AppResult<User>;

    async fn get_folder_by_id(&self, id: i32, user_id: i32) -> AppResult<Folder>;

    async fn get_note_by_id(&self, id: i32, user_id: i32) -> AppResult<Note>;

    async fn get_folders_by_user_id(&self, user_id: i32) -> AppResult<Vec<Folder>>;

    async fn get_notes_by_user_id(&self, user_id: i32) -> AppResult<Vec<Note>>;

    async fn get_users(&self) -> AppResult<Vec<User>>;

    async fn get_folders(&self) -> AppResult<Vec<Folder>>;

    async fn get_notes(&self) -> AppResult<Vec<Note>>;
}
