//! HTTP client for the knowledge-graph API.

mod client;
mod error;

pub use client::ApiClient;
pub use error::{ApiError, Result};
