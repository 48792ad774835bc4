//! Folder service - Folder use cases scoped to the calling user.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::FOLDER_TITLE_NOT_FREE;
use crate::domain::Folder;
use crate::errors::{AppError, AppResult, ErrorKind};
use crate::infra::Repository;

#[async_trait]
pub trait FolderService: Send + Sync {
    /// Create a folder and return its id
    async fn create_folder(&self, user_id: i32, title: &str) -> AppResult<i32>;

    async fn update_folder(&self, user_id: i32, folder_id: i32, title: &str) -> AppResult<()>;

    /// Delete a folder. Deleting a missing folder succeeds.
    async fn delete_folder(&self, user_id: i32, folder_id: i32) -> AppResult<()>;
}

/// Concrete implementation of FolderService
pub struct FolderManager {
    repo: Arc<dyn Repository>,
}

impl FolderManager {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Fails if another folder of `user_id` already has `title`.
    async fn ensure_title_free(&self, user_id: i32, title: &str, own_id: i32) -> AppResult<()> {
        let taken = self
            .repo
            .get_folders_by_user_id(user_id)
            .await?
            .iter()
            .any(|folder| folder.title == title && folder.id != own_id);

        if taken {
            return Err(AppError::validation(FOLDER_TITLE_NOT_FREE));
        }
        Ok(())
    }
}

#[async_trait]
impl FolderService for FolderManager {
    async fn create_folder(&self, user_id: i32, title: &str) -> AppResult<i32> {
        let folder = Folder::new(title, user_id)?;
        self.ensure_title_free(user_id, &folder.title, folder.id)
            .await?;

        let id = self.repo.save_entity(folder.into()).await?;
        tracing::debug!(user_id, folder_id = id, "Folder created");
        Ok(id)
    }

    async fn update_folder(&self, user_id: i32, folder_id: i32, title: &str) -> AppResult<()> {
        let update = Folder::new(title, user_id)?;
        self.ensure_title_free(user_id, &update.title, folder_id)
            .await?;

        let mut folder = self.repo.get_folder_by_id(folder_id, user_id).await?;
        folder.title = update.title;
        self.repo.save_entity(folder.into()).await?;
        Ok(())
    }

    async fn delete_folder(&self, user_id: i32, folder_id: i32) -> AppResult<()> {
        let folder = match self.repo.get_folder_by_id(folder_id, user_id).await {
            Ok(folder) => folder,
            Err(e) if e.is(ErrorKind::NotFound) => return Ok(()),
            Err(e) => return Err(e),
        };

        self.repo.delete_entity(folder.into()).await
    }
}
