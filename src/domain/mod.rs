//! Domain layer - Core authentication types and errors

pub mod error;
pub mod principal;

pub use error::AuthError;
pub use principal::{AuthenticatedPrincipal, Credentials};
