//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- the [`jwt::TokenService`] that issues and parses access tokens.
//! - [`credentials`] -- username/password authentication against the user store.
//! - [`gate`] -- the per-request authorization gate behind every protected route.
//! - [`error`] -- failure taxonomy shared by all of the above.

pub mod credentials;
pub mod error;
pub mod gate;
pub mod jwt;
pub mod password;

pub use error::{AuthError, AuthFailure, TokenError};
