//! Typed request dispatcher derived from a declarative route schema.
//!
//! Routes are declared once, as types. Each declaration names the route,
//! its HTTP method, how its URL is built, which inputs it takes (path
//! parameters, query parameters, body data) and how its response is
//! parsed. From those declarations the crate provides:
//!
//! - **Compile-time call checking**: a call must supply every required
//!   input and cannot supply inputs the route does not declare
//! - **One runtime dispatcher**: resolves the URL, merges default and caller
//!   query parameters and hands the finished request to a transport
//! - **Pluggable transports**: anything implementing [`Transport`]; a
//!   `reqwest`-backed [`HttpTransport`] with interceptors is included
//! - **Typed responses**: JSON, YAML, XML, text, HTML, CSV, binary or empty
//!
//! ## Example
//!
//! ```rust,no_run
//! use routekit::{schema, Dispatcher, HttpTransport, Route};
//! use url::Url;
//!
//! pub struct UserPath {
//!     pub id: String,
//! }
//!
//! #[derive(serde::Serialize)]
//! pub struct UpdateUser {
//!     pub username: String,
//! }
//!
//! #[derive(serde::Deserialize)]
//! pub struct User {
//!     pub id: String,
//!     pub username: String,
//! }
//!
//! #[derive(Route)]
//! #[route(name = "PATCH users/:id", method = Patch)]
//! #[route(url = |p: &UserPath| format!("users/{}", p.id))]
//! #[route(data = Option<UpdateUser>, response = json(User))]
//! pub struct PatchUser;
//!
//! # async fn run() -> Result<(), routekit::ApiError> {
//! let transport = HttpTransport::new(Url::parse("https://api.example.com/").unwrap())?;
//! let api = Dispatcher::new(schema![PatchUser]?, transport);
//!
//! let user: User = api
//!     .request(PatchUser)
//!     .path_params(UserPath { id: "2".into() })
//!     .data(Some(UpdateUser { username: "new name".into() }))
//!     .send()
//!     .await?;
//! # let _ = user;
//! # Ok(())
//! # }
//! ```

extern crate self as routekit;

mod dispatcher;
pub mod error;
mod method;
mod presence;
mod query;
pub mod response;
mod route;
mod route_name;
mod schema;
mod transport;
mod url_rule;

pub use dispatcher::{Call, Dispatcher};
pub use error::{ApiError, ClientError, ConfigError, ValidationError};
pub use method::RestMethod;
pub use presence::{Fill, Forbidden, Missing, Never, Optional, Present, Presence, PresenceKind, Required};
pub use query::{flatten_query, merge_query, QueryMap};
pub use route::Route;
pub use route_name::{RouteName, RouteNameError};
pub use routekit_macros::Route;
pub use schema::{RouteEntry, Schema, SchemaBuilder};
pub use transport::{
    HttpConfig, HttpOptions, HttpResponse, HttpTransport, HttpTransportBuilder, Interceptor,
    Interceptors, ResponseBody, Transport, TransportRequest,
};
pub use url_rule::UrlRule;
