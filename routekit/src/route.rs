//! Route declarations.
//!
//! A [`Route`] is a zero-sized type carrying everything needed to call one
//! endpoint: its name, method, URL rule, the presence of each input slot and
//! the response format. Most routes are declared with
//! [`#[derive(Route)]`](macro@crate::Route); implementing the trait by hand
//! is equivalent.

use crate::method::RestMethod;
use crate::presence::Presence;
use crate::query::QueryMap;
use crate::response::ResponseFormat;
use crate::url_rule::UrlRule;

/// A single declared endpoint.
///
/// The path-parameter marker is fixed by the [`UrlRule`] constructor
/// returned from [`url`](Self::url). Query-parameter and body values must
/// implement `Serialize` to be dispatched.
///
/// ## Examples
///
/// ```rust
/// use routekit::response::JsonFormat;
/// use routekit::{Forbidden, Optional, Required, RestMethod, Route, UrlRule};
///
/// pub struct UserPath {
///     pub id: String,
/// }
///
/// #[derive(serde::Serialize)]
/// pub struct UpdateUser {
///     pub username: String,
/// }
///
/// #[derive(serde::Deserialize)]
/// pub struct User {
///     pub id: String,
///     pub username: String,
/// }
///
/// pub struct PatchUser;
///
/// impl Route for PatchUser {
///     const NAME: &'static str = "PATCH users/:id";
///     const METHOD: RestMethod = RestMethod::Patch;
///     type PathParams = Required<UserPath>;
///     type QueryParams = Forbidden;
///     type Data = Optional<UpdateUser>;
///     type Response = JsonFormat<User>;
///
///     fn url() -> UrlRule<Self::PathParams> {
///         UrlRule::builder(|p: &UserPath| format!("users/{}", p.id))
///     }
/// }
///
/// assert_eq!(PatchUser::NAME, "PATCH users/:id");
/// ```
pub trait Route: Send + Sync + 'static {
    /// Unique name within a schema, conventionally `"METHOD path"`.
    const NAME: &'static str;

    /// HTTP method.
    const METHOD: RestMethod;

    /// Presence of path parameters.
    type PathParams: Presence;

    /// Presence of query parameters.
    type QueryParams: Presence;

    /// Presence of body data.
    type Data: Presence;

    /// Parsing strategy and output type for the response body.
    type Response: ResponseFormat;

    /// The URL rule.
    fn url() -> UrlRule<Self::PathParams>;

    /// Query parameters sent on every call, under the caller's.
    fn default_query() -> QueryMap {
        QueryMap::new()
    }
}
