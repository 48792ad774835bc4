//! Shared types used across handlers.

mod response;

pub use response::{ApiResponse, Created, IdResponse, NoContent};
