//! Bearer token issuance and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::{AuthenticatedPrincipal, AuthError};

/// Claims embedded in an issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal name)
    pub sub: String,
    /// Granted authority
    pub authority: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl Claims {
    /// Create new claims for a principal
    ///
    /// Only the first authority is carried; remaining authorities are
    /// discarded. An empty authority set is an error, never an empty claim.
    pub fn new(principal: &AuthenticatedPrincipal, expiration_days: u32) -> Result<Self, AuthError> {
        let authority = principal.first_authority()?.to_string();
        let now = Utc::now();
        let exp = now + Duration::days(i64::from(expiration_days));

        Ok(Self {
            sub: principal.name().to_string(),
            authority,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Check if the token has expired (expired the instant now >= exp)
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Rebuild the principal carried by the claims
    pub fn to_principal(&self) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal::new(self.sub.clone(), vec![self.authority.clone()])
    }
}

/// A freshly signed token together with the claims that went into it
#[derive(Debug, Clone)]
pub struct SignedToken {
    /// Full header value: prefix + compact token
    pub header_value: String,
    /// The exact claims that were signed
    pub claims: Claims,
}

/// Configuration for the token issuer
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Prefix prepended to the compact token in the Authorization header
    pub token_prefix: String,
    /// Token validity window in days
    pub expiration_days: u32,
}

impl TokenConfig {
    /// Create new token configuration
    pub fn new(secret: impl Into<String>, token_prefix: impl Into<String>, expiration_days: u32) -> Self {
        Self {
            secret: secret.into(),
            token_prefix: token_prefix.into(),
            expiration_days,
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            token_prefix: "Bearer ".to_string(),
            expiration_days: 7,
        }
    }
}

/// Trait for token issuance and validation
pub trait TokenIssuer: Send + Sync + Debug {
    /// Issue a signed bearer token for a principal, prefix included
    fn issue(&self, principal: &AuthenticatedPrincipal) -> Result<SignedToken, AuthError>;

    /// Validate a token (with or without prefix) and return its claims
    fn validate(&self, token: &str) -> Result<Claims, AuthError>;

    /// Token validity window in days
    fn expiration_days(&self) -> u32;
}

/// HS512-signed JWT issuer
#[derive(Clone)]
pub struct JwtService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_prefix", &self.config.token_prefix)
            .field("expiration_days", &self.config.expiration_days)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create a JWT service with default configuration
    pub fn with_default_config() -> Self {
        Self::new(TokenConfig::default())
    }

    fn strip_prefix<'a>(&self, token: &'a str) -> &'a str {
        token
            .strip_prefix(&self.config.token_prefix)
            .unwrap_or(token)
            .trim()
    }
}

impl TokenIssuer for JwtService {
    fn issue(&self, principal: &AuthenticatedPrincipal) -> Result<SignedToken, AuthError> {
        let claims = Claims::new(principal, self.config.expiration_days)?;

        let token = encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("Failed to sign token: {}", e)))?;

        Ok(SignedToken {
            header_value: format!("{}{}", self.config.token_prefix, token),
            claims,
        })
    }

    fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;

        let token_data = decode::<Claims>(self.strip_prefix(token), &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::token_invalid(e.to_string()),
            })?;

        // The library keeps a token with exp == now alive; our contract says
        // it is already expired.
        if token_data.claims.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        Ok(token_data.claims)
    }

    fn expiration_days(&self) -> u32 {
        self.config.expiration_days
    }
}
