//! File-backed repository: one JSON-lines file per collection.

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::entity_storage::EntityStorage;
use super::Repository;
use crate::config::{
    FOLDERS_FILE, FOLDER_NOT_FOUND, NOTES_FILE, NOTE_NOT_FOUND, USERS_FILE, USER_NOT_FOUND,
};
use crate::domain::{AnyEntity, Folder, Note, Password, User};
use crate::errors::{AppResult, OptionExt};

/// Repository over three independently locked collections.
pub struct FileRepository {
    users: EntityStorage<User>,
    folders: EntityStorage<Folder>,
    notes: EntityStorage<Note>,
}

impl FileRepository {
    /// Open (or create) the collections under `dir`.
    pub async fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await?;

        let repository = Self {
            users: EntityStorage::open(dir.join(USERS_FILE), USER_NOT_FOUND).await?,
            folders: EntityStorage::open(dir.join(FOLDERS_FILE), FOLDER_NOT_FOUND).await?,
            notes: EntityStorage::open(dir.join(NOTES_FILE), NOTE_NOT_FOUND).await?,
        };

        tracing::info!("File storage opened at {}", dir.display());
        Ok(repository)
    }
}

#[async_trait]
impl Repository for FileRepository {
    async fn save_entity(&self, entity: AnyEntity) -> AppResult<i32> {
        match entity {
            AnyEntity::User(user) => self.users.save(user).await,
            AnyEntity::Folder(folder) => self.folders.save(folder).await,
            AnyEntity::Note(note) => self.notes.save(note).await,
        }
    }

    /// Deletes cascade like the relational schema: a user takes their
    /// folders and notes along, a folder leaves its notes unfiled.
    async fn delete_entity(&self, entity: AnyEntity) -> AppResult<()> {
        match entity {
            AnyEntity::User(user) => {
                let notes = self.notes.delete_where(|note| note.user_id == user.id).await?;
                let folders = self
                    .folders
                    .delete_where(|folder| folder.user_id == user.id)
                    .await?;
                self.users.delete(user.id).await?;
                debug!(user_id = user.id, folders, notes, "Removed user with contents");
            }
            AnyEntity::Folder(folder) => {
                self.folders.delete(folder.id).await?;
                let unfiled = self
                    .notes
                    .update_where(
                        |note| note.folder_id == Some(folder.id),
                        |note| note.folder_id = None,
                    )
                    .await?;
                debug!(folder_id = folder.id, unfiled, "Removed folder");
            }
            AnyEntity::Note(note) => self.notes.delete(note.id).await?,
        }
        Ok(())
    }

    async fn get_user_by_id(&self, id: i32) -> AppResult<User> {
        self.users
            .find(|user| user.id == id)
            .await
            .ok_or_not_found(USER_NOT_FOUND)
    }

    async fn get_user(&self, login: &str, password: &str) -> AppResult<User> {
        self.users
            .find(|user| user.login == login)
            .await
            .filter(|user| Password::from_hash(user.password.as_str()).verify(password))
            .ok_or_not_found(USER_NOT_FOUND)
    }

    async fn get_folder_by_id(&self, id: i32, user_id: i32) -> AppResult<Folder> {
        self.folders
            .find(|folder| folder.id == id && folder.user_id == user_id)
            .await
            .ok_or_not_found(FOLDER_NOT_FOUND)
    }

    async fn get_note_by_id(&self, id: i32, user_id: i32) -> AppResult<Note> {
        self.notes
            .find(|note| note.id == id && note.user_id == user_id)
            .await
            .ok_or_not_found(NOTE_NOT_FOUND)
    }

    async fn get_folders_by_user_id(&self, user_id: i32) -> AppResult<Vec<Folder>> {
        Ok(self.folders.filter(|folder| folder.user_id == user_id).await)
    }

    async fn get_notes_by_user_id(&self, user_id: i32) -> AppResult<Vec<Note>> {
        Ok(self.notes.filter(|note| note.user_id == user_id).await)
    }

    async fn get_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.all().await)
    }

    async fn get_folders(&self) -> AppResult<Vec<Folder>> {
        Ok(self.folders.all().await)
    }

    async fn get_notes(&self) -> AppResult<Vec<Note>> {
        Ok(self.notes.all().await)
    }
}
