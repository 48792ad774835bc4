//! Folder domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::NoteResponse;
use crate::errors::{AppError, AppResult};

/// Folder owned by a single user. Titles are unique per owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i32,
    pub title: String,
    pub user_id: i32,
    pub timestamp: DateTime<Utc>,
}

impl Folder {
    /// Build a validated, unsaved folder.
    pub fn new(title: impl Into<String>, user_id: i32) -> AppResult<Self> {
        let title = title.into();
        if title.is_empty() {
            return Err(AppError::validation("Folder title cannot be empty"));
        }

        Ok(Self {
            id: 0,
            title,
            user_id,
            timestamp: Utc::now(),
        })
    }
}

/// Folder as presented to clients, with the notes filed under it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FolderResponse {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Work")]
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub notes: Vec<NoteResponse>,
}

impl FolderResponse {
    pub fn append_notes(&mut self, notes: impl IntoIterator<Item = NoteResponse>) {
        self.notes.extend(notes);
    }
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            title: folder.title,
            timestamp: folder.timestamp,
            notes: Vec::new(),
        }
    }
}
