//! Repository layer - Data access abstraction
//!
//! Services depend only on the [`Repository`] trait. Two adapters exist:
//! a JSON-lines file store and a SeaORM relational store.

mod entity_storage;
pub(crate) mod entities;
mod file_repository;
mod repository;
mod sql_repository;

pub use file_repository::FileRepository;
pub use repository::Repository;
pub use sql_repository::SqlRepository;

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockRepository;
