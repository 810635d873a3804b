//! Schema, route and configuration errors.

use thiserror::Error;

use crate::route_name::RouteNameError;

/// Errors in schema construction, route resolution or client configuration.
///
/// Apart from [`UnknownRoute`](Self::UnknownRoute), which guards calls made
/// against a schema that lacks the route, these indicate programmer errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The call names a route the dispatcher's schema does not contain.
    #[error("Unknown route: {name}")]
    UnknownRoute {
        /// The route name that was looked up.
        name: String,
    },

    /// Two routes were registered under the same name.
    #[error("Duplicate route: {name}")]
    DuplicateRoute {
        /// The duplicate route name.
        name: String,
    },

    /// Route name validation failed.
    #[error("Invalid route name: {0}")]
    InvalidRouteName(#[from] RouteNameError),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A route produced a URL that would not stay under the transport's base
    /// URL: either rooted (`/users`) or absolute (`https://other/users`).
    #[error("Route {route} resolved to {url}, which is not relative to the base URL")]
    NotRelative {
        /// The route being dispatched.
        route: String,
        /// The URL the route produced.
        url: String,
    },

    /// A URL builder that requires path parameters was invoked without them.
    #[error("Route {route} requires path parameters")]
    MissingPathParams {
        /// The route whose URL could not be built.
        route: String,
    },

    /// The path parameters do not have the type the schema entry expects.
    #[error("Path parameters for route {route} do not match the schema entry")]
    PathParamsMismatch {
        /// The route whose URL could not be built.
        route: String,
    },

    /// Query parameters could not be flattened into a key/value mapping.
    #[error("Invalid query parameters for route {route}: {message}")]
    InvalidQuery {
        /// The route being dispatched.
        route: String,
        /// What was wrong with the value.
        message: String,
    },

    /// Query parameters or body data failed to serialize.
    #[error("Failed to serialize payload for route {route}: {source}")]
    Payload {
        /// The route being dispatched.
        route: String,
        /// The underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// The variable name.
        var: &'static str,
    },

    /// An environment variable holds a value that cannot be used.
    #[error("Invalid value for {var}: {message}")]
    InvalidEnv {
        /// The variable name.
        var: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl ConfigError {
    /// Creates an unknown route error.
    pub fn unknown_route(name: impl Into<String>) -> Self {
        Self::UnknownRoute { name: name.into() }
    }

    /// Creates an invalid query error.
    pub fn invalid_query(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            route: route.into(),
            message: message.into(),
        }
    }
}
