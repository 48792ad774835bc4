//! Notebook aggregate: a user's folders with their notes, plus unfiled notes.

use serde::Serialize;
use utoipa::ToSchema;

use super::{FolderResponse, NoteResponse};

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Notebook {
    pub folders: Vec<FolderResponse>,
    /// Notes without a folder
    pub notes: Vec<NoteResponse>,
}
