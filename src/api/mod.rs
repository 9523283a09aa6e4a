//! Platform API client and types.

pub mod client;
pub mod error;
mod exports;
pub mod paths;
mod quotas;
mod snapshots;
mod volumes;

pub use client::ApiClient;
pub use error::{ApiError, ErrorEntry};
pub use paths::ApiVersion;
