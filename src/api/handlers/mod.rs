//! HTTP request handlers.

pub mod auth_handler;
pub mod folder_handler;
pub mod health_handler;
pub mod note_handler;
pub mod notebook_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use folder_handler::folder_routes;
pub use health_handler::health_routes;
pub use note_handler::note_routes;
pub use notebook_handler::notebook_routes;
pub use user_handler::{registration_routes, user_routes};
