//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Repository adapters (file and relational)

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{FileRepository, Repository, SqlRepository};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockRepository;
