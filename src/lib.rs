//! # isilon
//!
//! Rust client library for the Isilon OneFS platform API ("PAPI").
//!
//! ## Features
//!
//! - **Volumes**: create, inspect, copy and delete directories under a
//!   configurable volumes path (`/ifs/volumes` by default).
//! - **NFS exports**: export volumes, list exports, restrict or clear the
//!   allowed clients, unexport.
//! - **Quotas**: set, inspect, update and clear directory quotas.
//! - **Snapshots**: create, list, look up, delete, and restore a snapshot into
//!   a new volume.
//! - Platform API versions 1 and 2, detected from the cluster or pinned in the
//!   configuration.
//!
//! Every operation is a single HTTP round trip authenticated with basic auth.
//! Non-2xx replies surface as [`IsilonError::Api`] carrying the status and the
//! cluster's error list.
//!
//! [`Client`] addresses volumes by name; [`ApiClient`] (reachable through
//! [`Client::api`]) exposes the raw path- and id-based calls.
//!
//! ## Example: Basic Usage
//!
//! ```no_run
//! use isilon::{Client, ClientConfig};
//!
//! # async fn example() -> isilon::Result<()> {
//! let config = ClientConfig::new("https://10.0.0.1:8080", "admin", "secret")
//!     .with_volumes_path("k8s")
//!     .with_insecure(true);
//! let client = Client::connect(config).await?;
//!
//! // Create and export a volume with a 10 GiB hard limit
//! client.create_volume("data").await?;
//! client.set_quota_size("data", 10 * 1024 * 1024 * 1024).await?;
//! client.export("data").await?;
//! client.set_export_clients("data", &["10.0.0.50".to_string()]).await?;
//!
//! // Snapshot it and restore the snapshot into a new volume
//! let snapshot = client.create_snapshot("data", "data-nightly").await?;
//! client.copy_snapshot(snapshot.id, &snapshot.name, "data-restored").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Requests and replies are reported through `tracing` (`debug` for method,
//! URL and status, `trace` for bodies). Install any subscriber to see them.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use api::{ApiClient, ApiError, ApiVersion};
pub use client::{Client, VolumeExport};
pub use config::ClientConfig;
pub use error::{IsilonError, Result};
pub use model::{
    Export, PersonaId, PersonaIdType, Quota, QuotaThresholds, Snapshot, UserMapping, Volume,
};
