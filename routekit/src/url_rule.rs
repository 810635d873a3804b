//! URL rules and the path-parameter presence they imply.
//!
//! A route's URL is either a literal string or a function that builds the
//! string from path parameters. No template syntax is parsed: the builder
//! function *is* the substitution mechanism.
//!
//! The constructor chosen fixes the presence marker of the route's path
//! parameters, so a route cannot declare a literal URL and still demand
//! path parameters (or the other way round):
//!
//! | constructor                           | path parameters      |
//! |---------------------------------------|----------------------|
//! | [`UrlRule::literal`]                  | [`Forbidden`]        |
//! | [`UrlRule::computed`]                 | [`Forbidden`]        |
//! | [`UrlRule::builder`]                  | [`Required<T>`]      |
//! | [`UrlRule::optional_builder`]         | [`Optional<T>`]      |
//!
//! The resolved URL is a path relative to the transport's base URL, such as
//! `users/2`. [`HttpTransport`](crate::HttpTransport) rejects a rooted
//! (`/users/2`) or absolute (`https://host/users/2`) result with
//! [`ConfigError::NotRelative`] instead of letting it drop the base path or
//! replace the host.

use std::fmt;
use std::marker::PhantomData;

use crate::error::ConfigError;
use crate::presence::{Forbidden, Optional, Presence, Required};

enum UrlKind<P> {
    Literal(&'static str),
    Computed(fn() -> String),
    Builder(fn(&P) -> String),
    OptionalBuilder(fn(Option<&P>) -> String),
}

/// How a route turns its path parameters into a URL path.
///
/// ## Examples
///
/// ```rust
/// use routekit::{Required, UrlRule};
///
/// pub struct UserPath {
///     pub id: String,
/// }
///
/// let rule: UrlRule<Required<UserPath>> =
///     UrlRule::builder(|p: &UserPath| format!("users/{}", p.id));
///
/// let path = rule
///     .resolve("GET users/:id", Some(&UserPath { id: "2".into() }))
///     .unwrap();
/// assert_eq!(path, "users/2");
/// ```
pub struct UrlRule<S: Presence> {
    kind: UrlKind<S::Value>,
    _presence: PhantomData<fn() -> S>,
}

impl<S: Presence> Clone for UrlRule<S> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            UrlKind::Literal(s) => UrlKind::Literal(*s),
            UrlKind::Computed(f) => UrlKind::Computed(*f),
            UrlKind::Builder(f) => UrlKind::Builder(*f),
            UrlKind::OptionalBuilder(f) => UrlKind::OptionalBuilder(*f),
        };
        Self {
            kind,
            _presence: PhantomData,
        }
    }
}

impl<S: Presence> fmt::Debug for UrlRule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            UrlKind::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            UrlKind::Computed(_) => f.write_str("Computed(..)"),
            UrlKind::Builder(_) => f.write_str("Builder(..)"),
            UrlKind::OptionalBuilder(_) => f.write_str("OptionalBuilder(..)"),
        }
    }
}

impl UrlRule<Forbidden> {
    /// A fixed URL path. The route accepts no path parameters.
    pub const fn literal(url: &'static str) -> Self {
        Self {
            kind: UrlKind::Literal(url),
            _presence: PhantomData,
        }
    }

    /// A URL built by a zero-argument function. The route accepts no path
    /// parameters.
    pub fn computed(build: fn() -> String) -> Self {
        Self {
            kind: UrlKind::Computed(build),
            _presence: PhantomData,
        }
    }
}

impl<T: Send + Sync + 'static> UrlRule<Required<T>> {
    /// A URL built from a required path-parameter value.
    pub fn builder(build: fn(&T) -> String) -> Self {
        Self {
            kind: UrlKind::Builder(build),
            _presence: PhantomData,
        }
    }
}

impl<T: Send + Sync + 'static> UrlRule<Optional<T>> {
    /// A URL built from an optional path-parameter value. The builder is
    /// invoked with `None` when the caller supplies nothing.
    pub fn optional_builder(build: fn(Option<&T>) -> String) -> Self {
        Self {
            kind: UrlKind::OptionalBuilder(build),
            _presence: PhantomData,
        }
    }
}

impl<S: Presence> UrlRule<S> {
    /// Returns the literal URL, if this rule is one.
    pub fn as_literal(&self) -> Option<&'static str> {
        match self.kind {
            UrlKind::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Produces the final URL path for `route`.
    ///
    /// Literal and computed rules ignore `params`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingPathParams`] if a required builder is
    /// invoked without parameters.
    pub fn resolve(&self, route: &str, params: Option<&S::Value>) -> Result<String, ConfigError> {
        match &self.kind {
            UrlKind::Literal(s) => Ok((*s).to_string()),
            UrlKind::Computed(build) => Ok(build()),
            UrlKind::Builder(build) => params.map(build).ok_or_else(|| {
                ConfigError::MissingPathParams {
                    route: route.to_string(),
                }
            }),
            UrlKind::OptionalBuilder(build) => Ok(build(params)),
        }
    }
}
