//! HTTP surface (feature `axum_api`).

mod types;

pub use types::*;

pub mod axum;
