//! briefdesk_client - typed HTTP client for the advisor API.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ClientError, Result};
