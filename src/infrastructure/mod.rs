//! Infrastructure layer - implementations behind the domain seams

pub mod auth;
pub mod logging;
