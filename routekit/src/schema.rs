//! The runtime route registry.
//!
//! A [`Schema`] is built once from a set of [`Route`] types and then handed
//! to a [`Dispatcher`](crate::Dispatcher), which owns it for the rest of its
//! life. Each entry keeps the route's method, presence kinds, default query
//! parameters and a type-erased URL resolver, so that calls can be resolved
//! by name alone.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::ConfigError;
use crate::method::RestMethod;
use crate::presence::{Presence, PresenceKind};
use crate::query::QueryMap;
use crate::route::Route;
use crate::route_name::RouteName;

type Resolver = Arc<dyn Fn(Option<&dyn Any>) -> Result<String, ConfigError> + Send + Sync>;

/// Builds a [`Schema`] from a list of route types.
///
/// Expands to `Schema::builder().route::<A>().route::<B>()...build()` and so
/// evaluates to `Result<Schema, ConfigError>`.
///
/// ## Examples
///
/// ```rust
/// use routekit::{schema, Route};
///
/// #[derive(Route)]
/// #[route(name = "GET users", method = Get, url = "users", response = empty)]
/// pub struct ListUsers;
///
/// #[derive(Route)]
/// #[route(name = "DELETE users", method = Delete, url = "users", response = empty)]
/// pub struct DeleteUsers;
///
/// let schema = schema![ListUsers, DeleteUsers].unwrap();
/// assert_eq!(schema.names(), vec!["DELETE users", "GET users"]);
/// ```
#[macro_export]
macro_rules! schema {
    ($($route:ty),* $(,)?) => {
        $crate::Schema::builder()$(.route::<$route>())*.build()
    };
}

/// A registered route, with its type information erased.
#[derive(Clone)]
pub struct RouteEntry {
    name: RouteName,
    method: RestMethod,
    path_params: PresenceKind,
    query_params: PresenceKind,
    data: PresenceKind,
    literal_url: Option<&'static str>,
    resolver: Resolver,
    default_query: QueryMap,
}

impl RouteEntry {
    fn of<R: Route>(name: RouteName) -> Self {
        let rule = R::url();
        let literal_url = rule.as_literal();
        let resolver: Resolver = Arc::new(move |params: Option<&dyn Any>| {
            let params = match params {
                Some(any) => Some(
                    any.downcast_ref::<<R::PathParams as Presence>::Value>()
                        .ok_or_else(|| ConfigError::PathParamsMismatch {
                            route: R::NAME.to_string(),
                        })?,
                ),
                None => None,
            };
            rule.resolve(R::NAME, params)
        });

        Self {
            name,
            method: R::METHOD,
            path_params: <R::PathParams as Presence>::KIND,
            query_params: <R::QueryParams as Presence>::KIND,
            data: <R::Data as Presence>::KIND,
            literal_url,
            resolver,
            default_query: R::default_query(),
        }
    }

    /// The route name.
    pub fn name(&self) -> &RouteName {
        &self.name
    }

    /// The HTTP method.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Presence of path parameters.
    pub fn path_params(&self) -> PresenceKind {
        self.path_params
    }

    /// Presence of query parameters.
    pub fn query_params(&self) -> PresenceKind {
        self.query_params
    }

    /// Presence of body data.
    pub fn data(&self) -> PresenceKind {
        self.data
    }

    /// The URL, when the route declares a literal one.
    pub fn literal_url(&self) -> Option<&'static str> {
        self.literal_url
    }

    /// Query parameters sent on every call to this route.
    pub fn default_query(&self) -> &QueryMap {
        &self.default_query
    }

    /// Resolves the URL for a call.
    ///
    /// `params` must be the route's declared path-parameter type.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::PathParamsMismatch`] if `params` has another
    /// type, and [`ConfigError::MissingPathParams`] if the route requires
    /// path parameters and none were given.
    pub fn resolve_url(&self, params: Option<&dyn Any>) -> Result<String, ConfigError> {
        (self.resolver)(params)
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("path_params", &self.path_params)
            .field("query_params", &self.query_params)
            .field("data", &self.data)
            .field("literal_url", &self.literal_url)
            .field("default_query", &self.default_query)
            .finish_non_exhaustive()
    }
}

/// An immutable set of routes, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    routes: BTreeMap<String, RouteEntry>,
}

impl Schema {
    /// Creates a new schema builder.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the schema holds no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns `true` if a route with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Route names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.routes.keys().map(String::as_str).collect()
    }

    /// Looks up a route by name.
    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.routes.get(name)
    }
}

/// Builder for [`Schema`].
///
/// Registration errors are held until [`build`](Self::build), so routes can
/// be chained freely; the first error wins.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    routes: BTreeMap<String, RouteEntry>,
    error: Option<ConfigError>,
}

impl SchemaBuilder {
    /// Registers route `R`.
    pub fn route<R: Route>(mut self) -> Self {
        if self.error.is_some() {
            return self;
        }

        let name = match RouteName::new(R::NAME) {
            Ok(name) => name,
            Err(e) => {
                self.error = Some(e.into());
                return self;
            }
        };

        if self.routes.contains_key(name.as_str()) {
            self.error = Some(ConfigError::DuplicateRoute {
                name: name.into(),
            });
            return self;
        }

        debug!(route = R::NAME, method = %R::METHOD, "registered route");
        self.routes
            .insert(name.as_str().to_string(), RouteEntry::of::<R>(name));
        self
    }

    /// Finishes the schema.
    ///
    /// ## Errors
    ///
    /// Returns the first registration error: an invalid route name or a
    /// name registered twice.
    pub fn build(self) -> Result<Schema, ConfigError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(Schema {
                routes: self.routes,
            }),
        }
    }
}
