//! Business logic services
//!
//! Services encapsulate the credential rules and sit between the HTTP
//! routes and the repositories.

pub mod auth;

pub use auth::{AuthError, AuthService, LoginFailure, User};
