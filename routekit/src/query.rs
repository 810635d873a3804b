//! Query-parameter flattening and the default/override merge policy.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ConfigError;

/// Query parameters as handed to a transport: a plain, ordered key/value
/// mapping.
pub type QueryMap = BTreeMap<String, String>;

/// Flattens a caller's query-parameter value into a [`QueryMap`].
///
/// The value must serialize to an object (or `null`, which yields an empty
/// map). `null` fields are skipped so that unset `Option` fields never reach
/// the wire; strings, numbers and booleans are stringified.
///
/// ## Errors
///
/// Returns [`ConfigError::InvalidQuery`] for non-object values and for
/// nested objects or arrays, and [`ConfigError::Payload`] if serialization
/// itself fails.
pub fn flatten_query<V: Serialize>(route: &str, value: &V) -> Result<QueryMap, ConfigError> {
    let value = serde_json::to_value(value).map_err(|source| ConfigError::Payload {
        route: route.to_string(),
        source,
    })?;

    let fields = match value {
        Value::Null => return Ok(QueryMap::new()),
        Value::Object(fields) => fields,
        other => {
            return Err(ConfigError::invalid_query(
                route,
                format!("expected an object, got {}", json_kind(&other)),
            ))
        }
    };

    let mut query = QueryMap::new();
    for (key, value) in fields {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            nested @ (Value::Array(_) | Value::Object(_)) => {
                return Err(ConfigError::invalid_query(
                    route,
                    format!("`{key}` holds a nested {}", json_kind(&nested)),
                ))
            }
        };
        query.insert(key, rendered);
    }
    Ok(query)
}

/// Merges a route's default query parameters with the caller's.
///
/// Caller-supplied values win on key collision.
///
/// ## Examples
///
/// ```rust
/// use routekit::{merge_query, QueryMap};
///
/// let defaults = QueryMap::from([
///     ("format".to_string(), "json".to_string()),
///     ("page".to_string(), "1".to_string()),
/// ]);
/// let caller = QueryMap::from([("page".to_string(), "3".to_string())]);
///
/// let merged = merge_query(&defaults, caller);
/// assert_eq!(merged["page"], "3");
/// assert_eq!(merged["format"], "json");
/// ```
pub fn merge_query(defaults: &QueryMap, caller: QueryMap) -> QueryMap {
    let mut merged = defaults.clone();
    merged.extend(caller);
    merged
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Page {
        page: Option<u32>,
        #[serde(rename = "pageSize")]
        page_size: Option<u32>,
        sort: &'static str,
        desc: bool,
    }

    #[test]
    fn test_flatten_skips_null_fields() {
        let query = flatten_query(
            "GET users",
            &Page {
                page: Some(2),
                page_size: None,
                sort: "name",
                desc: true,
            },
        )
        .unwrap();

        assert_eq!(query.len(), 3);
        assert_eq!(query["page"], "2");
        assert_eq!(query["sort"], "name");
        assert_eq!(query["desc"], "true");
        assert!(!query.contains_key("pageSize"));
    }

    #[test]
    fn test_flatten_null_is_empty() {
        let query = flatten_query("GET users", &None::<u8>).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_flatten_rejects_scalar() {
        let err = flatten_query("GET users", &"page=1").unwrap_err();
        assert!(err.to_string().contains("expected an object, got string"));
    }

    #[test]
    fn test_flatten_rejects_nested_values() {
        let value = serde_json::json!({ "filter": { "role": "admin" } });
        let err = flatten_query("GET users", &value).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidQuery { .. }));
        assert!(err.to_string().contains("`filter` holds a nested object"));
    }

    #[test]
    fn test_merge_caller_wins() {
        let defaults = QueryMap::from([
            ("page".to_string(), "1".to_string()),
            ("format".to_string(), "json".to_string()),
        ]);
        let caller = QueryMap::from([("page".to_string(), "5".to_string())]);

        let merged = merge_query(&defaults, caller);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["page"], "5");
        assert_eq!(merged["format"], "json");
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge_query(&QueryMap::new(), QueryMap::new()).is_empty());
    }
}
