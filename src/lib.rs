//! tokengate
//!
//! A small authentication service: it accepts login requests, delegates
//! credential verification to a pluggable verifier, and issues a signed,
//! time-bounded bearer token placed into the response's Authorization
//! header. Tokens are stateless and self-validating; there is no session
//! storage and no revocation.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::auth::{
    Argon2Hasher, AuthService, InMemoryVerifier, JwtService, TokenConfig, TokenIssuer,
};
use rand::Rng;
use tracing::info;

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let issuer = create_token_issuer(config);

    let verifier = InMemoryVerifier::new(Arc::new(Argon2Hasher::new()));
    seed_initial_admin(&verifier).await?;

    let auth_service = AuthService::new(Arc::new(verifier), issuer);

    Ok(AppState::new(Arc::new(auth_service)))
}

/// Build the token issuer from config, env var, or a generated secret
fn create_token_issuer(config: &AppConfig) -> Arc<dyn TokenIssuer> {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "No JWT_SECRET configured. Generating random secret. \
                Issued tokens will NOT survive a restart."
            );
            generate_random_secret()
        });

    Arc::new(JwtService::new(TokenConfig::new(
        secret,
        config.auth.token_prefix.clone(),
        config.auth.token_expiration_days,
    )))
}

/// Register the initial admin principal
async fn seed_initial_admin(verifier: &InMemoryVerifier) -> anyhow::Result<()> {
    let (password, is_default) = match std::env::var("ADMIN_DEFAULT_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, true),
        _ => (generate_random_password(), false),
    };

    verifier
        .add_principal("admin", &password, vec!["ADMIN".to_string()])
        .await?;

    info!("===========================================");
    info!("Initial admin principal created!");
    info!("Username: admin");

    if is_default {
        info!("Password: (set via ADMIN_DEFAULT_PASSWORD)");
    } else {
        info!("Password: {}", password);
    }

    info!("Please change this password after first login.");
    info!("===========================================");

    Ok(())
}

/// Generate a random JWT secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Generate a random password for the initial admin principal
fn generate_random_password() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Credentials;
    use infrastructure::auth::CredentialVerifier;

    #[tokio::test]
    async fn test_create_app_state_seeds_admin() {
        let config = AppConfig::default();

        let state = create_app_state(&config).await.unwrap();

        // The seeded admin password is random, but a wrong password must be
        // rejected rather than erroring out.
        let err = state
            .auth_service
            .authenticate(br#"{"username": "admin", "password": "definitely-wrong"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, domain::AuthError::CredentialsRejected));
    }

    #[tokio::test]
    async fn test_seeded_admin_has_admin_authority() {
        let verifier = InMemoryVerifier::new(Arc::new(Argon2Hasher::new()));
        verifier
            .add_principal("admin", "bootstrap-password", vec!["ADMIN".to_string()])
            .await
            .unwrap();

        let principal = verifier
            .verify(&Credentials {
                username: "admin".to_string(),
                password: "bootstrap-password".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(principal.first_authority().unwrap(), "ADMIN");
    }

    #[test]
    fn test_generated_secret_length() {
        assert_eq!(generate_random_secret().len(), 64);
        assert_eq!(generate_random_password().len(), 16);
    }
}
