//! Notebook service - Assembles a user's folders and notes into one tree.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{FolderResponse, NoteResponse, Notebook};
use crate::errors::AppResult;
use crate::infra::Repository;

#[async_trait]
pub trait NotebookService: Send + Sync {
    async fn get_user_notebook(&self, user_id: i32) -> AppResult<Notebook>;
}

/// Concrete implementation of NotebookService
pub struct NotebookManager {
    repo: Arc<dyn Repository>,
}

impl NotebookManager {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl NotebookService for NotebookManager {
    async fn get_user_notebook(&self, user_id: i32) -> AppResult<Notebook> {
        let (folders, notes) = futures::try_join!(
            self.repo.get_folders_by_user_id(user_id),
            self.repo.get_notes_by_user_id(user_id),
        )?;

        let mut unfiled = Vec::new();
        let mut by_folder: HashMap<i32, Vec<NoteResponse>> = HashMap::new();
        for note in notes {
            match note.folder_id {
                Some(folder_id) => by_folder
                    .entry(folder_id)
                    .or_default()
                    .push(NoteResponse::from(note)),
                None => unfiled.push(NoteResponse::from(note)),
            }
        }

        // Notes pointing at a folder that no longer exists land in no bucket
        let folders = folders
            .into_iter()
            .map(|folder| {
                let mut response = FolderResponse::from(folder);
                if let Some(notes) = by_folder.remove(&response.id) {
                    response.append_notes(notes);
                }
                response
            })
            .collect();

        Ok(Notebook {
            folders,
            notes: unfiled,
        })
    }
}
