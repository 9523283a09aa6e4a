//! Snapshot operations.

use reqwest::Method;
use tracing::info;

use super::client::{ApiClient, NO_BODY};
use crate::error::{IsilonError, Result};
use crate::model::snapshot::{Snapshot, SnapshotCreate, SnapshotList};

const COPY_SOURCE_HEADER: &str = "x-isi-ifs-copy-source";

fn require_id(id: i64) -> Result<String> {
    if id == 0 {
        return Err(IsilonError::InvalidArgument("no snapshot id set".to_string()));
    }
    Ok(id.to_string())
}

impl ApiClient {
    /// List every snapshot on the cluster.
    pub async fn get_snapshots(&self) -> Result<Vec<Snapshot>> {
        let list: Option<SnapshotList> = self
            .query(Method::GET, self.api_version().snapshots_path(), None, &[], NO_BODY)
            .await?;
        Ok(list.map(|l| l.snapshots).unwrap_or_default())
    }

    /// Fetch one snapshot by id.
    pub async fn get_snapshot(&self, id: i64) -> Result<Snapshot> {
        let id = require_id(id)?;

        // A single snapshot comes back in the same list envelope as a listing.
        let list: Option<SnapshotList> = self
            .query(
                Method::GET,
                self.api_version().snapshots_path(),
                Some(id.as_str()),
                &[],
                NO_BODY,
            )
            .await?;

        list.and_then(|l| l.snapshots.into_iter().next())
            .ok_or_else(|| IsilonError::NotFound(format!("Snapshot not found: {}", id)))
    }

    /// Snapshot `path`, optionally under a chosen name.
    pub async fn create_snapshot(&self, path: &str, name: Option<&str>) -> Result<Snapshot> {
        if path.is_empty() {
            return Err(IsilonError::InvalidArgument("no path set".to_string()));
        }

        let body = SnapshotCreate {
            path,
            name: name.filter(|n| !n.is_empty()),
        };
        let snapshot: Snapshot = self
            .query(
                Method::POST,
                self.api_version().snapshots_path(),
                None,
                &[],
                Some(&body),
            )
            .await?
            .ok_or(IsilonError::InvalidResponse)?;

        info!(path, id = snapshot.id, name = %snapshot.name, "created snapshot");
        Ok(snapshot)
    }

    /// Copy the contents of `source_volume` as captured by snapshot
    /// `snapshot_name` into a new volume `destination`.
    pub async fn copy_snapshot(
        &self,
        snapshot_name: &str,
        source_volume: &str,
        destination: &str,
    ) -> Result<()> {
        if snapshot_name.is_empty() || source_volume.is_empty() || destination.is_empty() {
            return Err(IsilonError::InvalidArgument(
                "snapshot, source and destination names are required".to_string(),
            ));
        }

        let copy_source = format!(
            "/{}/{}/",
            self.volume_snapshot_path(snapshot_name),
            source_volume
        );
        self.execute(
            Method::PUT,
            self.namespace_path(),
            Some(destination),
            &[],
            &[(COPY_SOURCE_HEADER, copy_source.as_str())],
            NO_BODY,
        )
        .await?;

        info!(snapshot = snapshot_name, source_volume, destination, "copied snapshot");
        Ok(())
    }

    /// Delete a snapshot.
    pub async fn remove_snapshot(&self, id: i64) -> Result<()> {
        let id = require_id(id)?;
        self.execute(
            Method::DELETE,
            self.api_version().snapshots_path(),
            Some(id.as_str()),
            &[],
            &[],
            NO_BODY,
        )
        .await?;

        info!(id = %id, "removed snapshot");
        Ok(())
    }
}
