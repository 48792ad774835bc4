//! API middleware.

mod auth;
mod request_logger;

pub use auth::{auth_middleware, CurrentUser};
pub use request_logger::{request_logger, REQUEST_ID_HEADER};
