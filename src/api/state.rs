//! Application state - Dependency injection container.
//!
//! Provides handlers with the services and, when the relational backend
//! is active, the database handle used by the health check.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, Repository};
use crate::services::{
    AuthService, FolderService, NoteService, NotebookService, ServiceContainer, Services,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub folder_service: Arc<dyn FolderService>,
    pub note_service: Arc<dyn NoteService>,
    pub notebook_service: Arc<dyn NotebookService>,
    /// Present only with the relational backend
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Build every service over `repo`.
    pub fn from_config(
        repo: Arc<dyn Repository>,
        config: Config,
        database: Option<Arc<Database>>,
    ) -> Self {
        Self::from_container(&Services::new(repo, config), database)
    }

    /// Take the services out of an existing container.
    pub fn from_container(
        container: &dyn ServiceContainer,
        database: Option<Arc<Database>>,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            folder_service: container.folders(),
            note_service: container.notes(),
            notebook_service: container.notebook(),
            database,
        }
    }
}
