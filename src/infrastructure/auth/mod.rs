//! Authentication infrastructure module
//!
//! Token issuance/validation, password hashing, and the credential
//! verification seam.

mod jwt;
mod service;
mod verifier;

pub use jwt::{Claims, JwtService, SignedToken, TokenConfig, TokenIssuer};
pub use service::{AuthService, IssuedToken};
pub use verifier::{Argon2Hasher, CredentialVerifier, InMemoryVerifier, PasswordHasher};
