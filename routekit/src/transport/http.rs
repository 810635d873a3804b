//! HTTP transport built on `reqwest`, with tracing instrumentation.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{instrument, Span};
use url::Url;

use super::config::{HttpConfig, DEFAULT_TIMEOUT_SECS};
use super::interceptor::{Interceptor, Interceptors};
use super::{ResponseBody, Transport, TransportRequest};
use crate::error::{ApiError, ClientError, ConfigError};

/// Per-call passthrough settings for [`HttpTransport`].
///
/// There is deliberately no field for the URL, method, query parameters or
/// body: those always come from the route.
///
/// ```rust,compile_fail
/// use routekit::{HttpOptions, RestMethod};
///
/// let options = HttpOptions {
///     method: RestMethod::Delete,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpOptions {
    /// Extra headers for this call, applied after the transport defaults.
    pub headers: Vec<(String, String)>,
    /// Timeout for this call, replacing the transport default.
    pub timeout: Option<Duration>,
}

impl HttpOptions {
    /// Adds a header for this call.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the timeout for this call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A successful HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    headers: HeaderMap,
    body: bytes::Bytes,
}

impl HttpResponse {
    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw response body.
    pub fn body(&self) -> &bytes::Bytes {
        &self.body
    }
}

impl ResponseBody for HttpResponse {
    fn into_body(self) -> bytes::Bytes {
        self.body
    }
}

/// Builder for configuring an [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    interceptors: Interceptors,
}

impl HttpTransportBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            interceptors: Interceptors::new(),
        }
    }

    /// Sets the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let (name, value) = header_pair(name.as_ref(), value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Registers a request interceptor. Interceptors run in registration
    /// order on every call.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Builds the [`HttpTransport`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<HttpTransport, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .build()
            .map_err(ClientError::Request)?;

        Ok(HttpTransport {
            client,
            base_url: self.base_url,
            timeout: self.timeout,
            interceptors: self.interceptors,
        })
    }
}

/// Async HTTP transport.
///
/// Joins each resolved route URL onto the base URL, appends the merged
/// query parameters, attaches the JSON body when there is one and maps
/// non-success statuses to [`ClientError::HttpStatus`].
///
/// ## Examples
///
/// ```rust,no_run
/// use routekit::{HttpTransport, Schema, Dispatcher};
/// use url::Url;
///
/// # fn main() -> Result<(), routekit::ApiError> {
/// let transport = HttpTransport::builder(Url::parse("https://api.example.com/v1/").unwrap())
///     .default_header("X-Client", "routekit")?
///     .build()?;
/// let api = Dispatcher::new(Schema::builder().build()?, transport);
/// # let _ = api;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    interceptors: Interceptors,
}

impl HttpTransport {
    /// Creates a new builder for the given base URL.
    pub fn builder(base_url: Url) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url)
    }

    /// Creates a transport with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    /// Creates a transport from an [`HttpConfig`].
    ///
    /// ## Errors
    ///
    /// Returns an error if a configured header is invalid or the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &HttpConfig) -> Result<Self, ApiError> {
        let mut builder = Self::builder(config.base_url.clone()).timeout(config.timeout);
        for (name, value) in &config.headers {
            builder = builder.default_header(name, value)?;
        }
        builder.build()
    }

    /// Returns the base URL for this transport.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the default request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[instrument(
        name = "route_request",
        skip(self, request, options),
        fields(
            route = request.route,
            http.method = %request.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn send_request(
        &self,
        mut request: TransportRequest,
        options: HttpOptions,
    ) -> Result<HttpResponse, ApiError> {
        self.interceptors.apply(&mut request)?;

        let full_url = join_relative(&self.base_url, &request)?;
        Span::current().record("http.url", full_url.as_str());

        let mut builder = self
            .client
            .request(request.method.to_reqwest(), full_url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        for (name, value) in &options.headers {
            let (name, value) = header_pair(name, value)?;
            builder = builder.header(name, value);
        }
        let timeout = options.timeout.unwrap_or(self.timeout);
        if options.timeout.is_some() {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    duration_ms: timeout.as_millis() as u64,
                }
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        let status_code = status.as_u16();
        Span::current().record("http.status_code", status_code);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());

            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);

            return Err(ClientError::HttpStatus {
                status: status_code,
                message,
            }
            .into());
        }

        Span::current().record("otel.status_code", "OK");

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ClientError::Request)?;

        Ok(HttpResponse {
            status: status_code,
            headers,
            body,
        })
    }
}

impl Transport for HttpTransport {
    type Options = HttpOptions;
    type Output = HttpResponse;

    fn execute(
        &self,
        request: TransportRequest,
        options: Self::Options,
    ) -> impl Future<Output = Result<Self::Output, ApiError>> + Send {
        self.send_request(request, options)
    }
}

/// Joins a route URL onto the base URL, refusing rooted and absolute URLs
/// that would drop the base path or replace the host.
fn join_relative(base_url: &Url, request: &TransportRequest) -> Result<Url, ApiError> {
    if request.url.starts_with('/') || Url::parse(&request.url).is_ok() {
        return Err(ConfigError::NotRelative {
            route: request.route.to_string(),
            url: request.url.clone(),
        }
        .into());
    }
    base_url
        .join(&request.url)
        .map_err(|e| ConfigError::InvalidUrl(e).into())
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ApiError> {
    let name = HeaderName::try_from(name)
        .map_err(|e| ClientError::Connection(format!("invalid header name: {e}")))?;
    let value = HeaderValue::try_from(value)
        .map_err(|e| ClientError::Connection(format!("invalid header value: {e}")))?;
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::RestMethod;
    use crate::query::QueryMap;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(method: RestMethod, url: &str) -> TransportRequest {
        TransportRequest {
            route: "test",
            method,
            url: url.to_string(),
            query: QueryMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_execute_get() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"1"}"#))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let transport = HttpTransport::new(base_url).unwrap();

        let response = transport
            .execute(request(RestMethod::Get, "users/1"), HttpOptions::default())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.body().as_ref(), br#"{"id":"1"}"#);
    }

    #[tokio::test]
    async fn test_query_and_body_are_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/users/2"))
            .and(query_param("notify", "false"))
            .and(body_json(serde_json::json!({ "username": "new name" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let transport = HttpTransport::new(base_url).unwrap();

        let mut req = request(RestMethod::Patch, "users/2");
        req.query
            .insert("notify".to_string(), "false".to_string());
        req.body = Some(serde_json::json!({ "username": "new name" }));

        transport
            .execute(req, HttpOptions::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_passthrough_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/with-header"))
            .and(header("x-default", "yes"))
            .and(header("x-call", "per-call"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let transport = HttpTransport::builder(base_url)
            .default_header("X-Default", "yes")
            .unwrap()
            .build()
            .unwrap();

        let options = HttpOptions::default().with_header("X-Call", "per-call");
        let response = transport
            .execute(request(RestMethod::Get, "with-header"), options)
            .await
            .unwrap();
        assert_eq!(response.status(), 204);
    }

    #[tokio::test]
    async fn test_http_error_500() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/server-error"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let transport = HttpTransport::new(base_url).unwrap();

        let result = transport
            .execute(request(RestMethod::Get, "server-error"), HttpOptions::default())
            .await;
        assert!(matches!(
            result,
            Err(ApiError::Client(ClientError::HttpStatus { status: 500, .. }))
        ));
    }

    #[tokio::test]
    async fn test_http_error_401_is_not_translated() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/unauthorized"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let transport = HttpTransport::new(base_url).unwrap();

        let err = transport
            .execute(request(RestMethod::Get, "unauthorized"), HttpOptions::default())
            .await
            .unwrap_err();
        match err {
            ApiError::Client(ClientError::HttpStatus { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_interceptor_rewrites_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/users"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let transport = HttpTransport::builder(base_url)
            .interceptor(|r: &mut TransportRequest| -> Result<(), ApiError> {
                r.url = format!("v2/{}", r.url);
                Ok(())
            })
            .build()
            .unwrap();

        transport
            .execute(request(RestMethod::Get, "users"), HttpOptions::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_interceptor_rejection_skips_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let transport = HttpTransport::builder(base_url)
            .interceptor(|r: &mut TransportRequest| -> Result<(), ApiError> {
                if r.method == RestMethod::Delete {
                    return Err(ClientError::interceptor("deletes are disabled").into());
                }
                Ok(())
            })
            .build()
            .unwrap();

        let result = transport
            .execute(request(RestMethod::Delete, "users/1"), HttpOptions::default())
            .await;
        assert!(matches!(
            result,
            Err(ApiError::Client(ClientError::Interceptor(_)))
        ));
    }

    #[tokio::test]
    async fn test_url_must_stay_under_base_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&format!("{}/v1/", mock_server.uri())).unwrap();
        let transport = HttpTransport::new(base_url).unwrap();

        for url in ["/users", "//evil.test/users", "https://evil.test/users"] {
            let result = transport
                .execute(request(RestMethod::Get, url), HttpOptions::default())
                .await;
            match result {
                Err(ApiError::Config(ConfigError::NotRelative { route, url: got })) => {
                    assert_eq!(route, "test");
                    assert_eq!(got, url);
                }
                other => panic!("{url}: unexpected result {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_relative_url_keeps_base_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/users/1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&format!("{}/v1/", mock_server.uri())).unwrap();
        let transport = HttpTransport::new(base_url).unwrap();

        let response = transport
            .execute(request(RestMethod::Get, "users/1"), HttpOptions::default())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = HttpConfig::new(Url::parse("https://example.com").unwrap())
            .with_timeout(Duration::from_secs(60))
            .with_header("X-Client", "routekit");
        let transport = HttpTransport::from_config(&config).unwrap();
        assert_eq!(transport.base_url().as_str(), "https://example.com/");
        assert_eq!(transport.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_default_header() {
        let base_url = Url::parse("https://example.com").unwrap();
        let result = HttpTransport::builder(base_url).default_header("bad header", "value");
        assert!(matches!(
            result,
            Err(ApiError::Client(ClientError::Connection(_)))
        ));
    }
}
