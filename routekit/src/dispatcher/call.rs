//! The per-call builder.

use std::any::Any;
use std::marker::PhantomData;

use serde::Serialize;
use tracing::{debug, warn};

use super::Dispatcher;
use crate::error::{ApiError, ConfigError};
use crate::presence::{Fill, Missing, Present, Presence};
use crate::query::{flatten_query, merge_query, QueryMap};
use crate::response::ResponseFormat;
use crate::route::Route;
use crate::transport::{ResponseBody, Transport, TransportRequest};

type Input<S> = <S as Presence>::Input;

/// A call to route `R` being assembled.
///
/// `P`, `Q` and `D` track whether the path parameters, query parameters and
/// body data have been set. Each can be set once, and the call can only be
/// sent once every slot satisfies the route's declaration.
///
/// Setting a slot twice does not compile:
///
/// ```rust,compile_fail
/// # use routekit::{Dispatcher, HttpTransport, Route};
/// # pub struct UserPath { pub id: String }
/// #[derive(Route)]
/// #[route(name = "DELETE users/:id", method = Delete, response = empty)]
/// #[route(url = |p: &UserPath| format!("users/{}", p.id))]
/// pub struct DeleteUser;
///
/// async fn run(api: Dispatcher<HttpTransport>) -> Result<(), routekit::ApiError> {
///     api.request(DeleteUser)
///         .path_params(UserPath { id: "1".into() })
///         .path_params(UserPath { id: "2".into() })
///         .send()
///         .await?;
///     Ok(())
/// }
/// ```
///
/// Neither does passing fields the route's query type does not declare:
///
/// ```rust,compile_fail
/// # use routekit::{Dispatcher, HttpTransport, Route};
/// #[derive(serde::Serialize)]
/// pub struct Page {
///     pub page: Option<String>,
/// }
///
/// #[derive(Route)]
/// #[route(name = "GET users", method = Get, url = "users", response = empty)]
/// #[route(query_params = Page)]
/// pub struct ListUsers;
///
/// async fn run(api: Dispatcher<HttpTransport>) -> Result<(), routekit::ApiError> {
///     api.request(ListUsers)
///         .query_params(Page { page: None, page_size: Some(10) })
///         .send()
///         .await?;
///     Ok(())
/// }
/// ```
#[must_use = "a call does nothing until it is sent"]
pub struct Call<'d, T: Transport, R: Route, P = Missing, Q = Missing, D = Missing> {
    dispatcher: &'d Dispatcher<T>,
    path: P,
    query: Q,
    data: D,
    options: T::Options,
    _route: PhantomData<fn() -> R>,
}

impl<'d, T: Transport, R: Route> Call<'d, T, R> {
    pub(crate) fn new(dispatcher: &'d Dispatcher<T>) -> Self {
        Self {
            dispatcher,
            path: Missing,
            query: Missing,
            data: Missing,
            options: T::Options::default(),
            _route: PhantomData,
        }
    }
}

impl<'d, T: Transport, R: Route, Q, D> Call<'d, T, R, Missing, Q, D> {
    /// Sets the path parameters.
    pub fn path_params(
        self,
        params: Input<R::PathParams>,
    ) -> Call<'d, T, R, Present<Input<R::PathParams>>, Q, D> {
        Call {
            dispatcher: self.dispatcher,
            path: Present(params),
            query: self.query,
            data: self.data,
            options: self.options,
            _route: PhantomData,
        }
    }
}

impl<'d, T: Transport, R: Route, P, D> Call<'d, T, R, P, Missing, D> {
    /// Sets the query parameters.
    pub fn query_params(
        self,
        params: Input<R::QueryParams>,
    ) -> Call<'d, T, R, P, Present<Input<R::QueryParams>>, D> {
        Call {
            dispatcher: self.dispatcher,
            path: self.path,
            query: Present(params),
            data: self.data,
            options: self.options,
            _route: PhantomData,
        }
    }
}

impl<'d, T: Transport, R: Route, P, Q> Call<'d, T, R, P, Q, Missing> {
    /// Sets the body data.
    pub fn data(self, data: Input<R::Data>) -> Call<'d, T, R, P, Q, Present<Input<R::Data>>> {
        Call {
            dispatcher: self.dispatcher,
            path: self.path,
            query: self.query,
            data: Present(data),
            options: self.options,
            _route: PhantomData,
        }
    }
}

impl<'d, T: Transport, R: Route, P, Q, D> Call<'d, T, R, P, Q, D> {
    /// Replaces the transport's passthrough options for this call.
    pub fn options(mut self, options: T::Options) -> Self {
        self.options = options;
        self
    }

    /// Adjusts the transport's passthrough options for this call in place.
    pub fn configure(mut self, f: impl FnOnce(&mut T::Options)) -> Self {
        f(&mut self.options);
        self
    }
}

impl<'d, T, R, P, Q, D> Call<'d, T, R, P, Q, D>
where
    T: Transport,
    R: Route,
    P: Fill<R::PathParams>,
    Q: Fill<R::QueryParams>,
    D: Fill<R::Data>,
    <R::QueryParams as Presence>::Value: Serialize,
    <R::Data as Presence>::Value: Serialize,
{
    /// Resolves the call without sending it.
    ///
    /// ## Errors
    ///
    /// See [`send_raw`](Self::send_raw); only configuration errors can occur.
    pub fn into_request(self) -> Result<TransportRequest, ConfigError> {
        self.prepare().map(|(request, _)| request)
    }

    /// Sends the call and returns the transport's output unchanged.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::UnknownRoute`] if the dispatcher's schema has no
    ///   route named `R::NAME`; the transport is never invoked.
    /// - [`ConfigError::PathParamsMismatch`] if the schema entry under that
    ///   name declares different path parameters.
    /// - [`ConfigError::InvalidQuery`] or [`ConfigError::Payload`] if the
    ///   query parameters or body cannot be serialized.
    /// - Whatever the transport returns.
    pub async fn send_raw(self) -> Result<T::Output, ApiError> {
        let dispatcher = self.dispatcher;
        let (request, options) = self.prepare()?;
        dispatcher.transport.execute(request, options).await
    }

    /// Sends the call and parses the response body with the route's
    /// response format.
    ///
    /// ## Errors
    ///
    /// Everything [`send_raw`](Self::send_raw) can return, plus
    /// [`ValidationError`](crate::ValidationError) if the body does not
    /// parse.
    pub async fn send(self) -> Result<<R::Response as ResponseFormat>::Output, ApiError>
    where
        T::Output: ResponseBody,
    {
        let output = self.send_raw().await?;
        Ok(R::Response::parse(output.into_body()).await?)
    }

    fn prepare(self) -> Result<(TransportRequest, T::Options), ConfigError> {
        let route = R::NAME;
        let Some(entry) = self.dispatcher.schema.get(route) else {
            warn!(route, "route is not registered with this dispatcher");
            return Err(ConfigError::unknown_route(route));
        };

        let path = <P as Fill<R::PathParams>>::fill(self.path);
        let url = entry.resolve_url(path.as_ref().map(|p| p as &dyn Any))?;

        let caller_query = match <Q as Fill<R::QueryParams>>::fill(self.query) {
            Some(params) => flatten_query(route, &params)?,
            None => QueryMap::new(),
        };
        let query = merge_query(entry.default_query(), caller_query);

        let body = <D as Fill<R::Data>>::fill(self.data)
            .map(|data| serde_json::to_value(&data))
            .transpose()
            .map_err(|source| ConfigError::Payload {
                route: route.to_string(),
                source,
            })?;

        if body.is_some() && !entry.method().has_body() {
            warn!(
                route,
                method = %entry.method(),
                "sending a request body on a method that usually carries none"
            );
        }

        debug!(
            route,
            method = %entry.method(),
            url = %url,
            query_params = query.len(),
            has_body = body.is_some(),
            "resolved route"
        );

        let request = TransportRequest {
            route,
            method: entry.method(),
            url,
            query,
            body,
        };
        Ok((request, self.options))
    }
}
