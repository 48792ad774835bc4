//! Domain layer - Core business entities and logic
//!
//! Entities are built through validating constructors and never touch
//! storage. Response types are the client-facing projections.

pub mod entity;
pub mod folder;
pub mod note;
pub mod notebook;
pub mod password;
pub mod user;

pub use entity::{AnyEntity, Entity};
pub use folder::{Folder, FolderResponse};
pub use note::{Note, NoteResponse};
pub use notebook::Notebook;
pub use password::Password;
pub use user::{User, UserResponse};
