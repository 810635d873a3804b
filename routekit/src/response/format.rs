//! Response format trait and implementations.

use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Trait for response format parsing strategies.
///
/// Each format implements its own parsing logic, transforming a response
/// body into a typed output value. The format is the route's declared
/// response type; [`Call::send`](crate::Call::send) returns its `Output`.
///
/// ## Examples
///
/// ```rust
/// use routekit::response::{JsonFormat, ResponseFormat};
///
/// #[derive(serde::Deserialize)]
/// struct User {
///     id: String,
/// }
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let user = JsonFormat::<User>::parse(bytes::Bytes::from(r#"{"id":"2"}"#))
///     .await
///     .unwrap();
/// assert_eq!(user.id, "2");
/// # });
/// ```
pub trait ResponseFormat: Send + Sync + 'static {
    /// The output type after parsing.
    type Output: Send;

    /// Parse a response body into the output type.
    fn parse(
        body: bytes::Bytes,
    ) -> impl Future<Output = Result<Self::Output, ValidationError>> + Send;

    /// Returns the expected Content-Type for this format.
    fn content_type() -> &'static str;
}

/// JSON response format with typed deserialization.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Send + 'static> ResponseFormat for JsonFormat<T> {
    type Output = T;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        if body.is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        serde_json::from_slice(&body).map_err(ValidationError::JsonParse)
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}

/// YAML response format with typed deserialization.
#[derive(Debug, Clone, Copy)]
pub struct YamlFormat<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Send + 'static> ResponseFormat for YamlFormat<T> {
    type Output = T;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        serde_yaml::from_slice(&body).map_err(ValidationError::YamlParse)
    }

    fn content_type() -> &'static str {
        "application/yaml"
    }
}

/// XML response format.
#[derive(Debug, Clone, Copy)]
pub struct XmlFormat<X>(PhantomData<fn() -> X>);

impl<X: DeserializeOwned + Send + 'static> ResponseFormat for XmlFormat<X> {
    type Output = X;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        quick_xml::de::from_reader(body.as_ref()).map_err(ValidationError::XmlParse)
    }

    fn content_type() -> &'static str {
        "application/xml"
    }
}

fn utf8(body: bytes::Bytes, expected: &str) -> Result<String, ValidationError> {
    String::from_utf8(body.to_vec()).map_err(|e| ValidationError::ContentTypeMismatch {
        expected: expected.to_string(),
        actual: format!("invalid UTF-8: {e}"),
    })
}

/// Plain text response format.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormat;

impl ResponseFormat for PlainTextFormat {
    type Output = String;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        utf8(body, "valid UTF-8 text")
    }

    fn content_type() -> &'static str {
        "text/plain"
    }
}

/// HTML response format.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl ResponseFormat for HtmlFormat {
    type Output = String;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        utf8(body, "valid UTF-8 HTML")
    }

    fn content_type() -> &'static str {
        "text/html"
    }
}

/// CSV response format.
///
/// Returns the body as a UTF-8 string. Splitting rows is left to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormat;

impl ResponseFormat for CsvFormat {
    type Output = String;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        utf8(body, "valid UTF-8 CSV")
    }

    fn content_type() -> &'static str {
        "text/csv"
    }
}

/// Binary response format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryFormat;

impl ResponseFormat for BinaryFormat {
    type Output = Vec<u8>;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        Ok(body.to_vec())
    }

    fn content_type() -> &'static str {
        "application/octet-stream"
    }
}

/// No meaningful response body. Whatever the server sends is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFormat;

impl ResponseFormat for EmptyFormat {
    type Output = ();

    async fn parse(_body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        Ok(())
    }

    fn content_type() -> &'static str {
        "*/*"
    }
}
