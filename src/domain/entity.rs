//! Persisted entity contract shared by users, folders and notes.

use chrono::Utc;

use super::{Folder, Note, User};

/// Behaviour every persisted domain object exposes to storage adapters.
///
/// An id of 0 marks an entity that has not been saved yet.
pub trait Entity {
    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);

    /// Refresh the server timestamp. Called by the repository on every save.
    fn touch(&mut self);

    /// One-line description used in activity logs.
    fn info(&self) -> String;

    fn is_new(&self) -> bool {
        self.id() == 0
    }
}

/// Any entity the repository can save or delete.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyEntity {
    User(User),
    Folder(Folder),
    Note(Note),
}

impl AnyEntity {
    pub fn id(&self) -> i32 {
        match self {
            AnyEntity::User(user) => user.id,
            AnyEntity::Folder(folder) => folder.id,
            AnyEntity::Note(note) => note.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnyEntity::User(_) => "user",
            AnyEntity::Folder(_) => "folder",
            AnyEntity::Note(_) => "note",
        }
    }
}

impl From<User> for AnyEntity {
    fn from(user: User) -> Self {
        AnyEntity::User(user)
    }
}

impl From<Folder> for AnyEntity {
    fn from(folder: Folder) -> Self {
        AnyEntity::Folder(folder)
    }
}

impl From<Note> for AnyEntity {
    fn from(note: Note) -> Self {
        AnyEntity::Note(note)
    }
}

impl Entity for User {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn touch(&mut self) {
        self.timestamp = Utc::now();
    }

    fn info(&self) -> String {
        format!("User #{} {} {} ({})", self.id, self.name, self.surname, self.login)
    }
}

impl Entity for Folder {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn touch(&mut self) {
        self.timestamp = Utc::now();
    }

    fn info(&self) -> String {
        format!("Folder #{} '{}' of user {}", self.id, self.title, self.user_id)
    }
}

impl Entity for Note {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn touch(&mut self) {
        self.timestamp = Utc::now();
    }

    fn info(&self) -> String {
        format!(
            "Note #{} '{}' of user {} (folder: {:?}, favorite: {})",
            self.id, self.title, self.user_id, self.folder_id, self.is_favorite
        )
    }
}
