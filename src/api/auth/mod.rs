//! Authentication API endpoints
//!
//! Login issues a signed bearer token and copies it into the response's
//! Authorization header; `/me` echoes the principal carried by a presented
//! token.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequirePrincipal;
use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(get_current_principal))
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
}

/// Principal response (safe to expose)
#[derive(Debug, Serialize, Deserialize)]
pub struct PrincipalResponse {
    pub name: String,
    pub authority: String,
}

/// Login with username and password
///
/// POST /auth/login
///
/// The body is taken raw rather than through a JSON extractor so that a
/// malformed body surfaces as an authentication failure instead of a
/// framework-level 4xx.
pub async fn login(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let issued = state.auth_service.login(&body).await?;

    let header_value = HeaderValue::from_str(&issued.header_value)
        .map_err(|_| ApiError::internal("Issued token is not a valid header value"))?;

    let mut response = (
        StatusCode::OK,
        Json(LoginResponse {
            token: issued.header_value,
            expires_at: issued.expires_at.to_rfc3339(),
        }),
    )
        .into_response();

    response.headers_mut().insert(header::AUTHORIZATION, header_value);

    Ok(response)
}

/// Get the principal carried by the presented token
///
/// GET /auth/me
pub async fn get_current_principal(
    RequirePrincipal(principal): RequirePrincipal,
) -> Result<Json<PrincipalResponse>, ApiError> {
    let authority = principal.first_authority()?.to_string();

    Ok(Json(PrincipalResponse {
        name: principal.name().to_string(),
        authority,
    }))
}
