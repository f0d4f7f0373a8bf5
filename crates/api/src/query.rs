//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Pagination parameters (`?skip=&limit=`).
///
/// Values are clamped with `sqlapp_core::pagination` before reaching the
/// repository layer.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Resolve to a clamped `(offset, limit)` pair.
    pub fn resolve(&self) -> (i64, i64) {
        use sqlapp_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};

        (
            clamp_offset(self.skip),
            clamp_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT),
        )
    }
}
