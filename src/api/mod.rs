pub mod client;
pub mod error;
pub mod models;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{fetch_as, DesignApi, FigmaClient, DEFAULT_API_BASE};
pub use error::ApiError;
