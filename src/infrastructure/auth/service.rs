//! Login service: request parsing, delegation, token issuance

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{AuthenticatedPrincipal, AuthError, Credentials};

use super::jwt::{Claims, TokenIssuer};
use super::verifier::CredentialVerifier;

/// A freshly issued token, ready to be copied into the Authorization header
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Full header value: prefix + compact token
    pub header_value: String,
    /// When the token stops being valid
    pub expires_at: DateTime<Utc>,
}

/// Authentication service wiring the verifier and the token issuer
///
/// Stateless per invocation; safe for unrestricted concurrent use.
#[derive(Debug)]
pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(verifier: Arc<dyn CredentialVerifier>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { verifier, issuer }
    }

    /// Deserialize a raw login body and verify the credentials
    ///
    /// A malformed body is an authentication failure, not a server error.
    pub async fn authenticate(&self, body: &[u8]) -> Result<AuthenticatedPrincipal, AuthError> {
        info!("Attempting to authenticate user");

        let credentials: Credentials = serde_json::from_slice(body)
            .map_err(|e| AuthError::malformed_request(e.to_string()))?;

        self.verifier.verify(&credentials).await
    }

    /// Authenticate and issue a signed bearer token
    pub async fn login(&self, body: &[u8]) -> Result<IssuedToken, AuthError> {
        let principal = self.authenticate(body).await?;

        let signed = self.issuer.issue(&principal)?;
        // The advertised expiry is the one inside the signature, not a
        // second clock reading.
        let expires_at = DateTime::from_timestamp(signed.claims.exp, 0)
            .ok_or_else(|| AuthError::internal("Token expiration out of timestamp range"))?;

        info!(subject = principal.name(), "Successfully authenticated");

        Ok(IssuedToken {
            header_value: signed.header_value,
            expires_at,
        })
    }

    /// Validate a presented token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        debug!("Validating bearer token");
        self.issuer.validate(token)
    }
}
