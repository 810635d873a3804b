//! The dispatcher: one schema, one transport, many calls.
//!
//! ```rust
//! use routekit::{ApiError, Dispatcher, Route, Transport, TransportRequest, schema};
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
//! #[derive(Route)]
//! #[route(name = "PATCH users/:id", method = Patch, response = empty)]
//! #[route(url = |p: &UserPath| format!("users/{}", p.id), data = Option<UpdateUser>)]
//! pub struct PatchUser;
//!
//! /// Hands the resolved request straight back.
//! struct Echo;
//!
//! impl Transport for Echo {
//!     type Options = ();
//!     type Output = TransportRequest;
//!
//!     async fn execute(&self, request: TransportRequest, _: ()) -> Result<TransportRequest, ApiError> {
//!         Ok(request)
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let api = Dispatcher::new(schema![PatchUser].unwrap(), Echo);
//!
//! let sent = api
//!     .request(PatchUser)
//!     .path_params(UserPath { id: "2".into() })
//!     .data(Some(UpdateUser { username: "new name".into() }))
//!     .send_raw()
//!     .await
//!     .unwrap();
//!
//! assert_eq!(sent.url, "users/2");
//! assert_eq!(sent.method, routekit::RestMethod::Patch);
//! assert_eq!(sent.body, Some(serde_json::json!({ "username": "new name" })));
//! # });
//! ```

mod call;

use std::fmt;

use crate::route::Route;
use crate::schema::Schema;
use crate::transport::Transport;

pub use call::Call;

/// Dispatches calls for the routes of a [`Schema`] through a [`Transport`].
///
/// The dispatcher is immutable once built and can be shared between tasks
/// (wrap it in an `Arc`); each call builds its own request.
pub struct Dispatcher<T: Transport> {
    schema: Schema,
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    /// Creates a dispatcher owning `schema` and `transport`.
    pub fn new(schema: Schema, transport: T) -> Self {
        Self { schema, transport }
    }

    /// The routes this dispatcher knows about.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Starts a call to `route`.
    pub fn request<R: Route>(&self, _route: R) -> Call<'_, T, R> {
        Call::new(self)
    }

    /// Starts a call to route `R`, named by type.
    pub fn call<R: Route>(&self) -> Call<'_, T, R> {
        Call::new(self)
    }
}

impl<T: Transport + fmt::Debug> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.schema.names())
            .field("transport", &self.transport)
            .finish()
    }
}
