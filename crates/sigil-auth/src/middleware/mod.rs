//! HTTP middleware for authentication.

mod auth;

pub use auth::{AuthState, BearerAuth};
