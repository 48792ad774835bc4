//! Background jobs.

pub mod activity_log;

pub use activity_log::ActivityLogger;
