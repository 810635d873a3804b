//! Response parsing errors.

use thiserror::Error;

/// Errors raised while turning a response body into the route's declared
/// response type.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The body is not the JSON the route declares.
    #[error("Response body does not match the declared JSON type: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The body is not the YAML the route declares.
    #[error("Response body does not match the declared YAML type: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// The body is not the XML the route declares.
    #[error("Response body does not match the declared XML type: {0}")]
    XmlParse(#[from] quick_xml::DeError),

    /// The body is not in the route's declared format at all.
    #[error("Response body is not {expected}: {actual}")]
    ContentTypeMismatch {
        /// What the route's format requires.
        expected: String,
        /// What was found instead.
        actual: String,
    },

    /// The route declares a typed body but the response had none.
    #[error("Response body is empty but the route declares a typed response")]
    EmptyBody,
}

impl ValidationError {
    /// The body was not in the declared format (as opposed to in the right
    /// format but with the wrong shape).
    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, Self::ContentTypeMismatch { .. })
    }

    /// A deserializer rejected the body.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::JsonParse(_) | Self::YamlParse(_) | Self::XmlParse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_mismatch() {
        let err = ValidationError::ContentTypeMismatch {
            expected: "valid UTF-8 text".to_string(),
            actual: "invalid UTF-8".to_string(),
        };
        assert!(err.is_format_mismatch());
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_json_parse_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ValidationError::from(json_err);
        assert!(err.is_parse_error());
        assert!(!err.is_format_mismatch());
        assert!(err.to_string().starts_with("Response body does not match"));
    }

    #[test]
    fn test_empty_body_is_neither() {
        let err = ValidationError::EmptyBody;
        assert!(!err.is_parse_error());
        assert!(!err.is_format_mismatch());
    }
}
