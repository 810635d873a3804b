//! Request interceptors.
//!
//! Interceptors are registered once, when a transport is built, and run for
//! every outgoing call in registration order. Each one may rewrite the
//! resolved request or reject the call; a rejection surfaces as the error
//! of that call.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::TransportRequest;
use crate::error::ApiError;

/// A hook invoked on every outgoing request before it is sent.
///
/// Closures of the shape `Fn(&mut TransportRequest) -> Result<(), ApiError>`
/// are interceptors.
///
/// ## Examples
///
/// ```rust
/// use routekit::{ApiError, ClientError, Interceptor, TransportRequest};
///
/// let versioned = |request: &mut TransportRequest| -> Result<(), ApiError> {
///     request.url = format!("v2/{}", request.url);
///     Ok(())
/// };
///
/// let no_deletes = |request: &mut TransportRequest| -> Result<(), ApiError> {
///     if request.method == routekit::RestMethod::Delete {
///         return Err(ClientError::interceptor("deletes are disabled").into());
///     }
///     Ok(())
/// };
/// # let _: (&dyn Interceptor, &dyn Interceptor) = (&versioned, &no_deletes);
/// ```
pub trait Interceptor: Send + Sync {
    /// Inspects or rewrites `request`; an error rejects the call.
    fn intercept(&self, request: &mut TransportRequest) -> Result<(), ApiError>;
}

impl<F> Interceptor for F
where
    F: Fn(&mut TransportRequest) -> Result<(), ApiError> + Send + Sync,
{
    fn intercept(&self, request: &mut TransportRequest) -> Result<(), ApiError> {
        self(request)
    }
}

/// An ordered chain of interceptors.
#[derive(Clone, Default)]
pub struct Interceptors {
    chain: Vec<Arc<dyn Interceptor>>,
}

impl Interceptors {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interceptor to the end of the chain.
    pub fn push(&mut self, interceptor: impl Interceptor + 'static) {
        self.chain.push(Arc::new(interceptor));
    }

    /// Number of registered interceptors.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if no interceptor is registered.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Runs every interceptor in order, stopping at the first rejection.
    pub fn apply(&self, request: &mut TransportRequest) -> Result<(), ApiError> {
        for (index, interceptor) in self.chain.iter().enumerate() {
            if let Err(err) = interceptor.intercept(request) {
                debug!(route = request.route, index, error = %err, "interceptor rejected request");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptors")
            .field("len", &self.chain.len())
            .finish()
    }
}
