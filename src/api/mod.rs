//! REST access to the location service

pub mod client;
pub mod types;

pub use client::LocationClient;
pub use types::{ApiError, ApiResult};
