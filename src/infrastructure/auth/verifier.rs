//! Credential verification seam
//!
//! Credential checking policy lives behind `CredentialVerifier`; the token
//! issuer never sees a password. The in-memory implementation backs tests
//! and single-node bootstrap, anything heavier (LDAP, database) plugs in
//! behind the same trait.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{AuthenticatedPrincipal, AuthError, Credentials};

/// Trait for verifying login credentials
#[async_trait]
pub trait CredentialVerifier: Send + Sync + Debug {
    /// Verify credentials and return the authenticated principal
    async fn verify(&self, credentials: &Credentials) -> Result<AuthenticatedPrincipal, AuthError>;
}

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a password against a stored hash
    ///
    /// `Ok(false)` means the password does not match; `Err` means the stored
    /// hash itself is unusable. The two must not be conflated, a corrupted
    /// record is a server fault, not a rejected login.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Argon2-based password hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Create a new Argon2 hasher
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::internal(format!("Stored password hash is malformed: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::internal(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}

#[derive(Debug, Clone)]
struct PrincipalRecord {
    password_hash: String,
    authorities: Vec<String>,
}

/// In-memory credential verifier with Argon2-hashed passwords
#[derive(Debug)]
pub struct InMemoryVerifier {
    records: RwLock<HashMap<String, PrincipalRecord>>,
    hasher: Arc<dyn PasswordHasher>,
}

impl InMemoryVerifier {
    /// Create an empty verifier
    pub fn new(hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            hasher,
        }
    }

    /// Register a principal, hashing the password before storing it
    pub async fn add_principal(
        &self,
        username: impl Into<String>,
        password: &str,
        authorities: Vec<String>,
    ) -> Result<(), AuthError> {
        let password_hash = self.hasher.hash(password)?;

        self.records.write().await.insert(
            username.into(),
            PrincipalRecord {
                password_hash,
                authorities,
            },
        );

        Ok(())
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<AuthenticatedPrincipal, AuthError> {
        let records = self.records.read().await;

        // Unknown user and wrong password are indistinguishable to callers.
        let record = records
            .get(&credentials.username)
            .ok_or(AuthError::CredentialsRejected)?;

        if !self.hasher.verify(&credentials.password, &record.password_hash)? {
            return Err(AuthError::CredentialsRejected);
        }

        Ok(AuthenticatedPrincipal::new(
            credentials.username.clone(),
            record.authorities.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_verifier() -> InMemoryVerifier {
        InMemoryVerifier::new(Arc::new(Argon2Hasher::new()))
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).unwrap();

        assert!(hasher.verify(password, &hash).unwrap());
        assert!(!hasher.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_unique() {
        let hasher = Argon2Hasher::new();
        let password = "my_secure_password";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // Hashes differ due to random salt.
        assert_ne!(hash1, hash2);

        assert!(hasher.verify(password, &hash1).unwrap());
        assert!(hasher.verify(password, &hash2).unwrap());
    }

    #[test]
    fn test_empty_password() {
        let hasher = Argon2Hasher::new();

        let hash = hasher.hash("").unwrap();
        assert!(hasher.verify("", &hash).unwrap());
        assert!(!hasher.verify("not-empty", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_a_server_fault() {
        let hasher = Argon2Hasher::new();

        let err = hasher.verify("password", "invalid_hash_format").unwrap_err();
        assert!(matches!(err, AuthError::Internal { .. }));

        let err = hasher.verify("password", "").unwrap_err();
        assert!(matches!(err, AuthError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_verify_success() {
        let verifier = create_verifier();
        verifier
            .add_principal("alice", "secure_password123", vec!["ADMIN".to_string(), "USER".to_string()])
            .await
            .unwrap();

        let principal = verifier
            .verify(&credentials("alice", "secure_password123"))
            .await
            .unwrap();

        assert_eq!(principal.name(), "alice");
        assert_eq!(principal.authorities(), &["ADMIN".to_string(), "USER".to_string()]);
    }

    #[tokio::test]
    async fn test_verify_wrong_password() {
        let verifier = create_verifier();
        verifier
            .add_principal("alice", "secure_password123", vec!["ADMIN".to_string()])
            .await
            .unwrap();

        let err = verifier
            .verify(&credentials("alice", "wrong_password"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::CredentialsRejected));
    }

    #[tokio::test]
    async fn test_verify_unknown_user() {
        let verifier = create_verifier();

        let err = verifier
            .verify(&credentials("nobody", "password"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::CredentialsRejected));
    }

    #[tokio::test]
    async fn test_corrupted_record_is_not_a_rejection() {
        let verifier = create_verifier();
        verifier.records.write().await.insert(
            "alice".to_string(),
            PrincipalRecord {
                password_hash: "corrupted-not-a-phc-string".to_string(),
                authorities: vec!["ADMIN".to_string()],
            },
        );

        let err = verifier
            .verify(&credentials("alice", "any_password"))
            .await
            .unwrap_err();

        // A broken stored hash must surface loudly, never as a bad login.
        assert!(matches!(err, AuthError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_authority_order_is_preserved() {
        let verifier = create_verifier();
        verifier
            .add_principal(
                "bob",
                "password123",
                vec!["USER".to_string(), "ADMIN".to_string()],
            )
            .await
            .unwrap();

        let principal = verifier
            .verify(&credentials("bob", "password123"))
            .await
            .unwrap();

        assert_eq!(principal.first_authority().unwrap(), "USER");
    }
}
