//! Credentials and authenticated principal types

use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Raw login credentials supplied by the caller
///
/// Transient by design: deserialized from the request body, handed to the
/// verifier, and dropped. Never persisted by this crate.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Manual Debug so a password never ends up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// A verified identity plus its granted authorities, in grant order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    name: String,
    authorities: Vec<String>,
}

impl AuthenticatedPrincipal {
    pub fn new(name: impl Into<String>, authorities: Vec<String>) -> Self {
        Self {
            name: name.into(),
            authorities,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    /// First granted authority
    ///
    /// Tokens carry a single authority claim, so only the first entry is
    /// used; an empty authority set is a contract violation, not a default.
    pub fn first_authority(&self) -> Result<&str, AuthError> {
        self.authorities
            .first()
            .map(String::as_str)
            .ok_or_else(|| AuthError::empty_authority_set(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_authority() {
        let principal =
            AuthenticatedPrincipal::new("alice", vec!["ADMIN".to_string(), "USER".to_string()]);

        assert_eq!(principal.first_authority().unwrap(), "ADMIN");
    }

    #[test]
    fn test_first_authority_empty_set() {
        let principal = AuthenticatedPrincipal::new("bob", vec![]);

        let err = principal.first_authority().unwrap_err();
        assert!(matches!(err, AuthError::EmptyAuthoritySet { .. }));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };

        let debug = format!("{:?}", credentials);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_credentials_deserialization() {
        let credentials: Credentials =
            serde_json::from_str(r#"{"username": "alice", "password": "secret"}"#).unwrap();

        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.password, "secret");
    }
}
