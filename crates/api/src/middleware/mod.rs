//! Request extractors that run before handler bodies.
//!
//! - [`db::DbConn`] -- one pooled database connection for the request.
//! - [`auth::AuthUser`] -- the active user behind the request's bearer token.

pub mod auth;
pub mod db;
