//! Bearer token authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::AuthenticatedPrincipal;

/// Extractor that requires a valid bearer token
///
/// Reads the token from the `Authorization` header and validates signature
/// and expiry before the handler runs.
#[derive(Debug, Clone)]
pub struct RequirePrincipal(pub AuthenticatedPrincipal);

impl FromRequestParts<AppState> for RequirePrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Validating bearer token from Authorization header");

        let claims = state.auth_service.validate(&token)?;

        Ok(RequirePrincipal(claims.to_principal()))
    }
}

/// Extract the raw token value from the Authorization header
pub fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        return Ok(auth_str.trim().to_string());
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via the 'Authorization' header",
    ))
}
