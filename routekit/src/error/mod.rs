//! Layered error types for routekit.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type returned by every dispatch
//! - [`ClientError`] - Transport and network errors
//! - [`ValidationError`] - Response parsing errors
//! - [`ConfigError`] - Schema, route and configuration errors

mod api_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
