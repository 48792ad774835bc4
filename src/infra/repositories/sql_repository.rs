//! Relational repository implementation on SeaORM.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::{folder, note, user, FolderEntity, NoteEntity, UserEntity};
use super::Repository;
use crate::config::{FOLDER_NOT_FOUND, NOTE_NOT_FOUND, USER_NOT_FOUND};
use crate::domain::{AnyEntity, Folder, Note, Password, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Database;

/// Concrete implementation of Repository over a SeaORM connection.
///
/// Each operation is a single statement; there are no transactions.
pub struct SqlRepository {
    database: Arc<Database>,
}

impl SqlRepository {
    /// Share `database` with whoever else holds it (the health check).
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    fn db(&self) -> &DatabaseConnection {
        self.database.connection()
    }

    async fn save_user(&self, user: User) -> AppResult<i32> {
        let is_new = user.id == 0;
        let active = user::ActiveModel {
            id: if is_new { NotSet } else { Set(user.id) },
            login: Set(user.login),
            password: Set(user.password),
            name: Set(user.name),
            surname: Set(user.surname),
            timestamp: Set(Utc::now()),
        };

        let model = if is_new {
            active.insert(self.db()).await?
        } else {
            active
                .update(self.db())
                .await
                .map_err(|e| not_updated(e, USER_NOT_FOUND))?
        };
        Ok(model.id)
    }

    async fn save_folder(&self, folder: Folder) -> AppResult<i32> {
        let is_new = folder.id == 0;
        let active = folder::ActiveModel {
            id: if is_new { NotSet } else { Set(folder.id) },
            title: Set(folder.title),
            user_id: Set(folder.user_id),
            timestamp: Set(Utc::now()),
        };

        let model = if is_new {
            active.insert(self.db()).await?
        } else {
            active
                .update(self.db())
                .await
                .map_err(|e| not_updated(e, FOLDER_NOT_FOUND))?
        };
        Ok(model.id)
    }

    async fn save_note(&self, note: Note) -> AppResult<i32> {
        let is_new = note.id == 0;
        let active = note::ActiveModel {
            id: if is_new { NotSet } else { Set(note.id) },
            title: Set(note.title),
            content: Set(note.content),
            user_id: Set(note.user_id),
            folder_id: Set(note.folder_id),
            is_favorite: Set(note.is_favorite),
            tags: Set(serde_json::to_value(&note.tags)?),
            timestamp: Set(Utc::now()),
        };

        let model = if is_new {
            active.insert(self.db()).await?
        } else {
            active
                .update(self.db())
                .await
                .map_err(|e| not_updated(e, NOTE_NOT_FOUND))?
        };
        Ok(model.id)
    }
}

/// Updating a row that does not exist is NotFound, not a database failure.
fn not_updated(err: DbErr, message: &str) -> AppError {
    match err {
        DbErr::RecordNotUpdated => AppError::not_found(message),
        other => AppError::from(other),
    }
}

#[async_trait]
impl Repository for SqlRepository {
    async fn save_entity(&self, entity: AnyEntity) -> AppResult<i32> {
        match entity {
            AnyEntity::User(user) => self.save_user(user).await,
            AnyEntity::Folder(folder) => self.save_folder(folder).await,
            AnyEntity::Note(note) => self.save_note(note).await,
        }
    }

    async fn delete_entity(&self, entity: AnyEntity) -> AppResult<()> {
        match entity {
            AnyEntity::User(user) => UserEntity::delete_by_id(user.id).exec(self.db()).await?,
            AnyEntity::Folder(folder) => {
                FolderEntity::delete_by_id(folder.id).exec(self.db()).await?
            }
            AnyEntity::Note(note) => NoteEntity::delete_by_id(note.id).exec(self.db()).await?,
        };
        Ok(())
    }

    async fn get_user_by_id(&self, id: i32) -> AppResult<User> {
        UserEntity::find_by_id(id)
            .one(self.db())
            .await?
            .map(User::from)
            .ok_or_not_found(USER_NOT_FOUND)
    }

    async fn get_user(&self, login: &str, password: &str) -> AppResult<User> {
        UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .one(self.db())
            .await?
            .filter(|model| Password::from_hash(model.password.as_str()).verify(password))
            .map(User::from)
            .ok_or_not_found(USER_NOT_FOUND)
    }

    async fn get_folder_by_id(&self, id: i32, user_id: i32) -> AppResult<Folder> {
        FolderEntity::find_by_id(id)
            .filter(folder::Column::UserId.eq(user_id))
            .one(self.db())
            .await?
            .map(Folder::from)
            .ok_or_not_found(FOLDER_NOT_FOUND)
    }

    async fn get_note_by_id(&self, id: i32, user_id: i32) -> AppResult<Note> {
        NoteEntity::find_by_id(id)
            .filter(note::Column::UserId.eq(user_id))
            .one(self.db())
            .await?
            .map(Note::from)
            .ok_or_not_found(NOTE_NOT_FOUND)
    }

    async fn get_folders_by_user_id(&self, user_id: i32) -> AppResult<Vec<Folder>> {
        let models = FolderEntity::find()
            .filter(folder::Column::UserId.eq(user_id))
            .order_by_asc(folder::Column::Id)
            .all(self.db())
            .await?;

        Ok(models.into_iter().map(Folder::from).collect())
    }

    async fn get_notes_by_user_id(&self, user_id: i32) -> AppResult<Vec<Note>> {
        let models = NoteEntity::find()
            .filter(note::Column::UserId.eq(user_id))
            .order_by_asc(note::Column::Id)
            .all(self.db())
            .await?;

        Ok(models.into_iter().map(Note::from).collect())
    }

    async fn get_users(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(self.db())
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get_folders(&self) -> AppResult<Vec<Folder>> {
        let models = FolderEntity::find()
            .order_by_asc(folder::Column::Id)
            .all(self.db())
            .await?;

        Ok(models.into_iter().map(Folder::from).collect())
    }

    async fn get_notes(&self) -> AppResult<Vec<Note>> {
        let models = NoteEntity::find()
            .order_by_asc(note::Column::Id)
            .all(self.db())
            .await?;

        Ok(models.into_iter().map(Note::from).collect())
    }
}
