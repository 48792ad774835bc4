//! Note service - Note use cases scoped to the calling user.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::NOTE_TITLE_NOT_FREE;
use crate::domain::{Note, NoteResponse};
use crate::errors::{AppError, AppResult, ErrorKind};
use crate::infra::Repository;

#[async_trait]
pub trait NoteService: Send + Sync {
    /// Create a note and return its id
    async fn create_note(
        &self,
        user_id: i32,
        title: &str,
        content: &str,
        tags: Option<Vec<String>>,
    ) -> AppResult<i32>;

    /// Overwrite title, content and tags of a note
    async fn update_note(
        &self,
        user_id: i32,
        note_id: i32,
        title: &str,
        content: &str,
        tags: Option<Vec<String>>,
    ) -> AppResult<()>;

    /// Delete a note. Deleting a missing note succeeds.
    async fn delete_note(&self, user_id: i32, note_id: i32) -> AppResult<()>;

    /// File a note under one of the user's folders, or unfile it with `None`
    async fn move_to_folder(
        &self,
        user_id: i32,
        note_id: i32,
        folder_id: Option<i32>,
    ) -> AppResult<()>;

    async fn add_to_favorites(&self, user_id: i32, note_id: i32) -> AppResult<()>;

    async fn delete_from_favorites(&self, user_id: i32, note_id: i32) -> AppResult<()>;

    /// Notes whose title or content contains `query`, or that carry it as a
    /// tag. An empty query returns every note of the user.
    async fn find_notes_by_query_phrase(
        &self,
        user_id: i32,
        query: &str,
    ) -> AppResult<Vec<NoteResponse>>;

    async fn get_favorite_notes(&self, user_id: i32) -> AppResult<Vec<NoteResponse>>;
}

/// Concrete implementation of NoteService
pub struct NoteManager {
    repo: Arc<dyn Repository>,
}

impl NoteManager {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Fails if another note of `user_id` already has `title`.
    async fn ensure_title_free(&self, user_id: i32, title: &str, own_id: i32) -> AppResult<()> {
        let taken = self
            .repo
            .get_notes_by_user_id(user_id)
            .await?
            .iter()
            .any(|note| note.title == title && note.id != own_id);

        if taken {
            return Err(AppError::validation(NOTE_TITLE_NOT_FREE));
        }
        Ok(())
    }

    async fn set_favorite(&self, user_id: i32, note_id: i32, is_favorite: bool) -> AppResult<()> {
        let mut note = self.repo.get_note_by_id(note_id, user_id).await?;
        note.is_favorite = is_favorite;
        self.repo.save_entity(note.into()).await?;
        Ok(())
    }
}

#[async_trait]
impl NoteService for NoteManager {
    async fn create_note(
        &self,
        user_id: i32,
        title: &str,
        content: &str,
        tags: Option<Vec<String>>,
    ) -> AppResult<i32> {
        let note = Note::new(title, content, user_id, tags)?;
        self.ensure_title_free(user_id, &note.title, note.id).await?;

        let id = self.repo.save_entity(note.into()).await?;
        tracing::debug!(user_id, note_id = id, "Note created");
        Ok(id)
    }

    async fn update_note(
        &self,
        user_id: i32,
        note_id: i32,
        title: &str,
        content: &str,
        tags: Option<Vec<String>>,
    ) -> AppResult<()> {
        let update = Note::new(title, content, user_id, tags)?;
        self.ensure_title_free(user_id, &update.title, note_id).await?;

        let mut note = self.repo.get_note_by_id(note_id, user_id).await?;
        note.apply(update);
        self.repo.save_entity(note.into()).await?;
        Ok(())
    }

    async fn delete_note(&self, user_id: i32, note_id: i32) -> AppResult<()> {
        let note = match self.repo.get_note_by_id(note_id, user_id).await {
            Ok(note) => note,
            Err(e) if e.is(ErrorKind::NotFound) => return Ok(()),
            Err(e) => return Err(e),
        };

        self.repo.delete_entity(note.into()).await
    }

    async fn move_to_folder(
        &self,
        user_id: i32,
        note_id: i32,
        folder_id: Option<i32>,
    ) -> AppResult<()> {
        let mut note = self.repo.get_note_by_id(note_id, user_id).await?;

        if let Some(folder_id) = folder_id {
            self.repo.get_folder_by_id(folder_id, user_id).await?;
        }

        note.folder_id = folder_id;
        self.repo.save_entity(note.into()).await?;
        Ok(())
    }

    async fn add_to_favorites(&self, user_id: i32, note_id: i32) -> AppResult<()> {
        self.set_favorite(user_id, note_id, true).await
    }

    async fn delete_from_favorites(&self, user_id: i32, note_id: i32) -> AppResult<()> {
        self.set_favorite(user_id, note_id, false).await
    }

    async fn find_notes_by_query_phrase(
        &self,
        user_id: i32,
        query: &str,
    ) -> AppResult<Vec<NoteResponse>> {
        let notes = self.repo.get_notes_by_user_id(user_id).await?;

        Ok(notes
            .into_iter()
            .filter(|note| query.is_empty() || note.matches(query))
            .map(NoteResponse::from)
            .collect())
    }

    async fn get_favorite_notes(&self, user_id: i32) -> AppResult<Vec<NoteResponse>> {
        let notes = self.repo.get_notes_by_user_id(user_id).await?;

        Ok(notes
            .into_iter()
            .filter(|note| note.is_favorite)
            .map(NoteResponse::from)
            .collect())
    }
}
