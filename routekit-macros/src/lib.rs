//! Derive macro for routekit route declarations.
//!
//! ## Examples
//!
//! ```ignore
//! use routekit::Route;
//!
//! #[derive(Route)]
//! #[route(name = "PATCH users/:id", method = Patch)]
//! #[route(url = |p: &UserPath| format!("users/{}", p.id))]
//! #[route(data = Option<UpdateUser>, response = json(User))]
//! pub struct PatchUser;
//! ```

use proc_macro::TokenStream;

mod codegen;
mod derive_route;
mod parse;

/// Derive macro for route declarations.
///
/// Implements `routekit::Route` for a unit struct.
///
/// ## Attributes
///
/// - `#[route(name = "...")]` - Unique route name (required)
/// - `#[route(method = Get|Post|Put|Patch|Delete|Head|Options|Trace)]` - HTTP method (required)
/// - `#[route(url = ...)]` - URL rule (required), one of:
///   - `"users"`: literal, no path parameters
///   - `|| ...`: computed, no path parameters
///   - `|p: &T| ...`: built from required path parameters `T`
///   - `|p: Option<&T>| ...`: built from optional path parameters `T`
///   - `some_fn`: a function; pair with `path_params = T` or
///     `path_params = Option<T>` when it takes parameters
/// - `#[route(query_params = T)]` - Query parameters; `Option<T>` makes them optional (optional)
/// - `#[route(data = T)]` - Body data; `Option<T>` makes it optional (optional)
/// - `#[route(response = json(T)|yaml(T)|xml(T)|text|html|csv|binary|empty)]` - Response format (required)
/// - `#[route(default_query(key = "value", ...))]` - Query parameters sent on every call (optional)
///
/// Omitting `query_params` or `data` means the route takes none.
///
/// ## Examples
///
/// ```ignore
/// #[derive(Route)]
/// #[route(name = "GET users", method = Get, url = "users")]
/// #[route(query_params = Option<Page>, default_query(pageSize = 20))]
/// #[route(response = json(Vec<User>))]
/// pub struct ListUsers;
/// ```
#[proc_macro_derive(Route, attributes(route))]
pub fn derive_route(input: TokenStream) -> TokenStream {
    derive_route::derive_route_impl(input.into()).into()
}
