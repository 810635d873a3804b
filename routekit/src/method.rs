//! HTTP method types for route declarations.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods a route can declare.
///
/// The method always comes from the route declaration; callers cannot
/// override it per call.
///
/// ## Examples
///
/// ```rust
/// use routekit::RestMethod;
///
/// let method = RestMethod::Patch;
/// assert!(method.has_body());
/// assert!(!method.is_idempotent());
///
/// let parsed: RestMethod = "DELETE".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Delete);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl RestMethod {
    /// Whether requests with this method conventionally carry body data.
    ///
    /// A route's data slot still decides whether a body is sent; the
    /// dispatcher only warns when a body goes out on a method without one.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Whether repeating the request leaves the server in the same state.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }

    /// Whether the request is read-only.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options | Self::Trace)
    }

    /// The `reqwest` method with the same verb.
    pub fn to_reqwest(self) -> reqwest::Method {
        use reqwest::Method as M;

        match self {
            Self::Get => M::GET,
            Self::Post => M::POST,
            Self::Put => M::PUT,
            Self::Patch => M::PATCH,
            Self::Delete => M::DELETE,
            Self::Head => M::HEAD,
            Self::Options => M::OPTIONS,
            Self::Trace => M::TRACE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
