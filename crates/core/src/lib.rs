//! Domain primitives shared by the data and HTTP layers.

pub mod error;
pub mod pagination;
pub mod types;
