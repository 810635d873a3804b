use std::fmt;

/// A validated route name, the key a route is registered under.
///
/// Rules:
/// 1. Must not be empty.
/// 2. Must not start or end with whitespace.
/// 3. Must not contain control characters.
///
/// Anything else is allowed, so `"GET /users/:id"` is a valid name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteName(String);

#[derive(Debug, PartialEq, Eq)]
pub enum RouteNameError {
    Empty,
    SurroundingWhitespace,
    ControlCharacter(char),
}

impl fmt::Display for RouteNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "route name cannot be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "route name cannot start or end with whitespace")
            }
            Self::ControlCharacter(c) => {
                write!(f, "route name contains control character {:?}", c)
            }
        }
    }
}

impl std::error::Error for RouteNameError {}

impl RouteName {
    /// Creates a new RouteName, validating it first.
    pub fn new<S: Into<String>>(name: S) -> Result<Self, RouteNameError> {
        let s = name.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), RouteNameError> {
        if s.is_empty() {
            return Err(RouteNameError::Empty);
        }
        if s.trim() != s {
            return Err(RouteNameError::SurroundingWhitespace);
        }
        if let Some(c) = s.chars().find(|c| c.is_control()) {
            return Err(RouteNameError::ControlCharacter(c));
        }
        Ok(())
    }

    /// Returns a string slice reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RouteName> for String {
    fn from(name: RouteName) -> Self {
        name.0
    }
}

impl TryFrom<&str> for RouteName {
    type Error = RouteNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for RouteName {
    type Error = RouteNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(RouteName::new("GET /users/:id").is_ok());
        assert!(RouteName::new("test_1").is_ok());
        assert!(RouteName::new("PATCH users/:id").is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(RouteName::new(""), Err(RouteNameError::Empty));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(
            RouteName::new(" GET /users"),
            Err(RouteNameError::SurroundingWhitespace)
        );
        assert_eq!(
            RouteName::new("GET /users\t"),
            Err(RouteNameError::SurroundingWhitespace)
        );
    }

    #[test]
    fn test_control_character() {
        assert_eq!(
            RouteName::new("GET\u{7}/users"),
            Err(RouteNameError::ControlCharacter('\u{7}'))
        );
    }

    #[test]
    fn test_traits() {
        let name: RouteName = "GET /users".try_into().unwrap();
        assert_eq!(name.to_string(), "GET /users");

        let s: String = name.into();
        assert_eq!(s, "GET /users");
    }
}
