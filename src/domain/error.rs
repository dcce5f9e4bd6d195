use thiserror::Error;

/// Authentication domain errors
///
/// `MalformedRequest` and `CredentialsRejected` are kept distinct internally
/// but must be surfaced to clients as the same generic authentication
/// failure. `TokenExpired` and `TokenInvalid` stay distinct so callers can
/// decide between prompting a re-login and rejecting outright.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Malformed authentication request: {message}")]
    MalformedRequest { message: String },

    #[error("Credentials rejected")]
    CredentialsRejected,

    #[error("Principal '{subject}' has no authorities")]
    EmptyAuthoritySet { subject: String },

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {message}")]
    TokenInvalid { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AuthError {
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    pub fn empty_authority_set(subject: impl Into<String>) -> Self {
        Self::EmptyAuthoritySet {
            subject: subject.into(),
        }
    }

    pub fn token_invalid(message: impl Into<String>) -> Self {
        Self::TokenInvalid {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
