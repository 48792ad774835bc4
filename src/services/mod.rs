//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the `Repository` and
//! `HashService` abstractions and are shared as `Arc<dyn Trait>`.

mod auth_service;
pub mod container;
mod folder_service;
mod hash_service;
mod note_service;
mod notebook_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use folder_service::{FolderManager, FolderService};
pub use hash_service::{Argon2Hasher, HashService};
pub use note_service::{NoteManager, NoteService};
pub use notebook_service::{NotebookManager, NotebookService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use hash_service::MockHashService;
