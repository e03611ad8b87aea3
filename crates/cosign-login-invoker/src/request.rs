//! Login request

use crate::error::{LoginError, Result};
use crate::sensitive::Sensitive;

/// Validated input for a single `cosign login` invocation.
///
/// All three fields are non-empty. The registry is passed through as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    registry: String,
    username: String,
    password: Sensitive,
}

impl LoginRequest {
    /// Create a request, rejecting empty fields
    pub fn new(
        registry: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<Sensitive>,
    ) -> Result<Self> {
        let request = Self {
            registry: registry.into(),
            username: username.into(),
            password: password.into(),
        };

        if request.registry.is_empty() {
            return Err(LoginError::MissingField("registry"));
        }
        if request.username.is_empty() {
            return Err(LoginError::MissingField("username"));
        }
        if request.password.is_empty() {
            return Err(LoginError::MissingField("password"));
        }

        Ok(request)
    }

    pub fn registry(&self) -> &str {
        &self.registry
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Sensitive {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = LoginRequest::new("registry.example.com", "alice", "changeme").unwrap();
        assert_eq!(request.registry(), "registry.example.com");
        assert_eq!(request.username(), "alice");
        assert_eq!(request.password().expose(), "changeme");
    }

    #[test]
    fn test_registry_is_not_validated() {
        let request = LoginRequest::new("not a url; $(true)", "u", "p").unwrap();
        assert_eq!(request.registry(), "not a url; $(true)");
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert!(matches!(
            LoginRequest::new("", "u", "p"),
            Err(LoginError::MissingField("registry"))
        ));
        assert!(matches!(
            LoginRequest::new("r", "", "p"),
            Err(LoginError::MissingField("username"))
        ));
        assert!(matches!(
            LoginRequest::new("r", "u", ""),
            Err(LoginError::MissingField("password"))
        ));
    }

    #[test]
    fn test_debug_hides_password() {
        let request = LoginRequest::new("r", "u", "s3cr3t-value").unwrap();
        let debug = format!("{request:?}");
        assert!(!debug.contains("s3cr3t-value"));
        assert!(debug.contains("registry: \"r\""));
    }
}
