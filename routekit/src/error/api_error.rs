//! Top-level API error type.

use super::{ClientError, ConfigError, ValidationError};
use thiserror::Error;

/// Top-level error type for all dispatch operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust
/// use routekit::{ApiError, ConfigError};
///
/// fn describe(err: &ApiError) -> &'static str {
///     match err {
///         ApiError::Client(_) => "transport failure",
///         ApiError::Validation(_) => "unreadable response",
///         ApiError::Config(ConfigError::UnknownRoute { .. }) => "route not in schema",
///         ApiError::Config(_) => "configuration error",
///     }
/// }
///
/// let err: ApiError = ConfigError::UnknownRoute { name: "GET /nope".into() }.into();
/// assert_eq!(describe(&err), "route not in schema");
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport errors (network, timeout, non-success status).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response parsing errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Schema and route configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns `true` if the error was raised before the transport was invoked.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_error() {
        let client_err = ClientError::Timeout { duration_ms: 5000 };
        let api_err: ApiError = client_err.into();
        assert!(matches!(api_err, ApiError::Client(_)));
        assert!(!api_err.is_config());
    }

    #[test]
    fn test_from_config_error() {
        let api_err: ApiError = ConfigError::UnknownRoute {
            name: "GET /missing".to_string(),
        }
        .into();
        assert!(api_err.is_config());
    }

    #[test]
    fn test_error_display_is_transparent() {
        let err = ApiError::Validation(ValidationError::EmptyBody);
        assert_eq!(err.to_string(), ValidationError::EmptyBody.to_string());
    }
}
