//! Notes API - personal note-taking backend
//!
//! Users register, log in with a JWT, and manage folders and notes.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities and their validation rules
//! - **services**: Use cases scoped to the calling user
//! - **infra**: Repository adapters (JSON-lines files, SeaORM) and migrations
//! - **api**: HTTP handlers, middleware, and routes
//! - **jobs**: Background activity logger
//! - **types**: Shared response envelopes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server on the file store
//! cargo run -- serve
//!
//! # Start on PostgreSQL
//! cargo run -- serve --storage postgres
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Folder, Note, Password, User};
pub use errors::{AppError, AppResult};
