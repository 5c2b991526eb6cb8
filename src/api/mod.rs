//! REST API client module for the Verbatim cloud service.
//!
//! This module provides the `ApiClient` for calling the service's
//! Authenticate endpoints with JWT bearer token authentication.

pub mod client;
pub mod error;
pub mod models;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use models::TokenInfo;
