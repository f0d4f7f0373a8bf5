//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&mut PgConnection` as the first argument, so callers decide
//! which pooled connection a request runs on.

pub mod item_repo;
pub mod user_repo;

pub use item_repo::ItemRepo;
pub use user_repo::UserRepo;
