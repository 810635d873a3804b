//! The transport contract and the bundled HTTP transport.
//!
//! The dispatcher never talks to the network itself. Once a call is
//! resolved it hands a [`TransportRequest`] plus the caller's passthrough
//! options to a [`Transport`] and returns whatever the transport produces.

mod config;
mod http;
mod interceptor;

use std::future::Future;
use std::sync::Arc;

use crate::error::ApiError;
use crate::method::RestMethod;
use crate::query::QueryMap;

pub use config::HttpConfig;
pub use http::{HttpOptions, HttpResponse, HttpTransport, HttpTransportBuilder};
pub use interceptor::{Interceptor, Interceptors};

/// A fully resolved request, ready for a transport.
///
/// `url` and `method` are always set and `query` is always a plain mapping
/// (possibly empty). `body` is only `Some` when the route declares a data
/// slot and the caller filled it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// Name of the route that produced this request.
    pub route: &'static str,
    /// HTTP method from the route declaration.
    pub method: RestMethod,
    /// Resolved URL path, relative to the transport's base URL.
    pub url: String,
    /// Merged query parameters.
    pub query: QueryMap,
    /// JSON body data.
    pub body: Option<serde_json::Value>,
}

/// An HTTP-calling mechanism the dispatcher delegates to.
///
/// `Options` carries every per-call setting a transport supports beyond the
/// ones the dispatcher owns (url, method, query parameters, body), so
/// option types must not expose fields for those.
pub trait Transport: Send + Sync {
    /// Per-call passthrough settings.
    type Options: Default + Send;
    /// What a successful call produces.
    type Output: Send;

    /// Performs the request.
    fn execute(
        &self,
        request: TransportRequest,
        options: Self::Options,
    ) -> impl Future<Output = Result<Self::Output, ApiError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    type Options = T::Options;
    type Output = T::Output;

    fn execute(
        &self,
        request: TransportRequest,
        options: Self::Options,
    ) -> impl Future<Output = Result<Self::Output, ApiError>> + Send {
        (**self).execute(request, options)
    }
}

/// Transport outputs whose body can be parsed into a route's response type.
pub trait ResponseBody {
    /// Consumes the output, returning the raw body bytes.
    fn into_body(self) -> bytes::Bytes;
}

impl ResponseBody for bytes::Bytes {
    fn into_body(self) -> bytes::Bytes {
        self
    }
}

impl ResponseBody for Vec<u8> {
    fn into_body(self) -> bytes::Bytes {
        bytes::Bytes::from(self)
    }
}
