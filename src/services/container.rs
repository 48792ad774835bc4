//! Service Container - Centralized service access.
//!
//! Every service shares one repository handle; the container is built once
//! at startup and cloned into the HTTP state.

use std::sync::Arc;

use super::{
    Argon2Hasher, AuthService, Authenticator, FolderManager, FolderService, NoteManager,
    NoteService, NotebookManager, NotebookService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Repository;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn folders(&self) -> Arc<dyn FolderService>;

    fn notes(&self) -> Arc<dyn NoteService>;

    fn notebook(&self) -> Arc<dyn NotebookService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    folder_service: Arc<dyn FolderService>,
    note_service: Arc<dyn NoteService>,
    notebook_service: Arc<dyn NotebookService>,
}

impl Services {
    /// Wire every service over a single repository
    pub fn new(repo: Arc<dyn Repository>, config: Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(repo.clone(), config)),
            user_service: Arc::new(UserManager::new(repo.clone(), Arc::new(Argon2Hasher))),
            folder_service: Arc::new(FolderManager::new(repo.clone())),
            note_service: Arc::new(NoteManager::new(repo.clone())),
            notebook_service: Arc::new(NotebookManager::new(repo)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn folders(&self) -> Arc<dyn FolderService> {
        self.folder_service.clone()
    }

    fn notes(&self) -> Arc<dyn NoteService> {
        self.note_service.clone()
    }

    fn notebook(&self) -> Arc<dyn NotebookService> {
        self.notebook_service.clone()
    }
}
