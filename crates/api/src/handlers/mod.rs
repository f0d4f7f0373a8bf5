//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `sqlapp_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod items;
pub mod users;
