//! High-level client addressing resources by volume name.
//!
//! Volume names are resolved against the configured volumes path, so
//! `client.path("data")` is `/ifs/volumes/data` by default.

use std::collections::HashMap;

use tracing::debug;

use crate::api::{ApiClient, ApiVersion};
use crate::config::ClientConfig;
use crate::error::{IsilonError, Result};
use crate::model::{Export, Quota, QuotaThresholds, Snapshot, Volume};

/// A volume together with the export that publishes it.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeExport {
    pub volume: Volume,
    pub export_path: String,
    pub clients: Vec<String>,
}

/// Cluster client.
#[derive(Debug, Clone)]
pub struct Client {
    api: ApiClient,
}

impl Client {
    /// Create a client without contacting the cluster.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    /// Create a client, detecting the API version when the config leaves it unset.
    ///
    /// # Example
    /// ```no_run
    /// use isilon::{Client, ClientConfig};
    ///
    /// # async fn example() -> isilon::Result<()> {
    /// let config = ClientConfig::new("https://10.0.0.1:8080", "admin", "secret")
    ///     .with_insecure(true);
    /// let client = Client::connect(config).await?;
    /// for volume in client.get_volumes().await? {
    ///     println!("{}", client.path(&volume.name));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::connect(config).await?,
        })
    }

    /// Connect with settings from the `ISILON_*` environment variables.
    pub async fn from_env() -> Result<Self> {
        Self::connect(ClientConfig::from_env()?).await
    }

    /// Low-level access to the platform API.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn api_version(&self) -> ApiVersion {
        self.api.api_version()
    }

    /// Absolute path of the named volume.
    pub fn path(&self, name: &str) -> String {
        format!("{}/{}", self.api.volumes_path(), name)
    }

    /// Last component of a path.
    pub fn name_from_path(path: &str) -> &str {
        path.rsplit('/').next().unwrap_or(path)
    }

    // Volumes

    /// Look up a volume by id or name; a non-empty id wins.
    pub async fn get_volume(&self, id: &str, name: &str) -> Result<Volume> {
        let name = if id.is_empty() { name } else { id };
        self.api.get_volume(name).await
    }

    pub async fn get_volumes(&self) -> Result<Vec<Volume>> {
        self.api.get_volumes().await
    }

    pub async fn create_volume(&self, name: &str) -> Result<Volume> {
        self.api.create_volume(name).await?;
        Ok(Volume::new(name))
    }

    pub async fn delete_volume(&self, name: &str) -> Result<()> {
        self.api.delete_volume(name).await
    }

    /// Copy a volume and return the new one.
    pub async fn copy_volume(&self, source: &str, destination: &str) -> Result<Volume> {
        self.api.copy_volume(source, destination).await?;
        self.get_volume(destination, destination).await
    }

    pub async fn export_volume(&self, name: &str) -> Result<()> {
        self.export(name).await
    }

    pub async fn unexport_volume(&self, name: &str) -> Result<()> {
        self.unexport(name).await
    }

    /// Volumes whose path is published by some export, with that export's clients.
    pub async fn get_volume_exports(&self) -> Result<Vec<VolumeExport>> {
        let exports = self.get_exports().await?;

        let mut clients_by_path: HashMap<&str, &[String]> = HashMap::new();
        for export in &exports {
            for path in &export.paths {
                clients_by_path.insert(path.as_str(), export.clients());
            }
        }

        let volumes = self.get_volumes().await?;
        Ok(volumes
            .into_iter()
            .filter_map(|volume| {
                let export_path = self.path(&volume.name);
                let clients = clients_by_path.get(export_path.as_str())?.to_vec();
                Some(VolumeExport {
                    volume,
                    export_path,
                    clients,
                })
            })
            .collect())
    }

    // Exports

    pub async fn get_exports(&self) -> Result<Vec<Export>> {
        self.api.get_exports().await
    }

    /// Find an export by id or by the path of the named volume.
    pub async fn get_export(&self, id: Option<i64>, name: &str) -> Result<Option<Export>> {
        let path = self.path(name);
        Ok(self
            .get_exports()
            .await?
            .into_iter()
            .find(|e| Some(e.id) == id || e.has_path(&path)))
    }

    pub async fn is_exported(&self, name: &str) -> Result<bool> {
        let path = self.path(name);
        Ok(self.get_exports().await?.iter().any(|e| e.has_path(&path)))
    }

    /// Export the named volume unless it already is.
    pub async fn export(&self, name: &str) -> Result<()> {
        if self.is_exported(name).await? {
            debug!(volume = name, "volume already exported");
            return Ok(());
        }
        self.api.export(&self.path(name)).await.map(|_| ())
    }

    /// Clients allowed to mount the named volume, or `None` when it is not exported.
    pub async fn get_export_clients(&self, name: &str) -> Result<Option<Vec<String>>> {
        Ok(self
            .get_export(None, name)
            .await?
            .map(|e| e.clients().to_vec()))
    }

    /// Restrict the named volume's export to `clients`. No-op when not exported.
    pub async fn set_export_clients(&self, name: &str, clients: &[String]) -> Result<()> {
        match self.get_export(None, name).await? {
            Some(export) => self.api.set_export_clients(export.id, clients).await,
            None => Ok(()),
        }
    }

    /// Open the named volume's export to every client.
    pub async fn clear_export_clients(&self, name: &str) -> Result<()> {
        self.set_export_clients(name, &[]).await
    }

    /// Stop exporting the named volume. No-op when not exported.
    pub async fn unexport(&self, name: &str) -> Result<()> {
        match self.get_export(None, name).await? {
            Some(export) => self.api.unexport(export.id).await,
            None => Ok(()),
        }
    }

    // Quotas

    pub async fn get_quota(&self, name: &str) -> Result<Quota> {
        self.api.get_quota(&self.path(name)).await
    }

    /// Set a hard size limit on the named volume.
    pub async fn set_quota_size(&self, name: &str, size: i64) -> Result<()> {
        self.api
            .set_quota_hard_threshold(&self.path(name), size)
            .await
    }

    pub async fn set_quota(&self, name: &str, thresholds: QuotaThresholds) -> Result<()> {
        self.api
            .set_quota_thresholds(&self.path(name), thresholds)
            .await
    }

    /// Change the hard size limit of the named volume.
    pub async fn update_quota_size(&self, name: &str, size: i64) -> Result<()> {
        self.api
            .update_quota_hard_threshold(&self.path(name), size)
            .await
    }

    pub async fn update_quota(&self, name: &str, thresholds: QuotaThresholds) -> Result<()> {
        self.api
            .update_quota_thresholds(&self.path(name), thresholds)
            .await
    }

    /// Remove the quota from the named volume.
    pub async fn clear_quota(&self, name: &str) -> Result<()> {
        self.api.delete_quota(&self.path(name)).await
    }

    // Snapshots

    pub async fn get_snapshots(&self) -> Result<Vec<Snapshot>> {
        self.api.get_snapshots().await
    }

    /// Snapshots taken of the named volume.
    pub async fn get_snapshots_by_path(&self, name: &str) -> Result<Vec<Snapshot>> {
        let path = self.path(name);
        Ok(self
            .get_snapshots()
            .await?
            .into_iter()
            .filter(|s| s.path == path)
            .collect())
    }

    /// Look up a snapshot by id, falling back to a scan by name.
    ///
    /// Returns `Ok(None)` when the scan finds nothing; the id lookup's error is
    /// returned when no name is given.
    pub async fn get_snapshot(&self, id: i64, name: &str) -> Result<Option<Snapshot>> {
        let by_id = self.api.get_snapshot(id).await;
        let err = match by_id {
            Ok(snapshot) => return Ok(Some(snapshot)),
            Err(err) => err,
        };

        if name.is_empty() {
            return Err(err);
        }
        debug!(id, name, error = %err, "snapshot id lookup failed, scanning by name");

        Ok(self
            .get_snapshots()
            .await?
            .into_iter()
            .find(|s| s.name == name))
    }

    /// Snapshot the named volume.
    pub async fn create_snapshot(&self, volume: &str, name: &str) -> Result<Snapshot> {
        self.api
            .create_snapshot(&self.path(volume), Some(name))
            .await
    }

    pub async fn remove_snapshot(&self, id: i64, name: &str) -> Result<()> {
        let snapshot = self.require_snapshot(id, name).await?;
        self.api.remove_snapshot(snapshot.id).await
    }

    /// Restore a snapshot's contents into a new volume and return that volume.
    pub async fn copy_snapshot(&self, id: i64, name: &str, destination: &str) -> Result<Volume> {
        let snapshot = self.require_snapshot(id, name).await?;
        self.api
            .copy_snapshot(
                &snapshot.name,
                Self::name_from_path(&snapshot.path),
                destination,
            )
            .await?;
        self.get_volume(destination, destination).await
    }

    async fn require_snapshot(&self, id: i64, name: &str) -> Result<Snapshot> {
        self.get_snapshot(id, name).await?.ok_or_else(|| {
            IsilonError::NotFound(format!("Snapshot doesn't exist: ({}, {})", id, name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockResponse, MockServer};
    use serde_json::json;

    fn client(server: &MockServer) -> Client {
        Client::new(server.config().with_api_version(ApiVersion::V1)).unwrap()
    }

    fn exports_reply() -> MockResponse {
        MockResponse::ok(json!({
            "exports": [
                {"id": 4, "paths": ["/ifs/volumes/a"], "clients": ["10.0.0.1"]},
                {"id": 5, "paths": ["/ifs/other", "/ifs/volumes/b"], "clients": []}
            ]
        }))
    }

    #[test]
    fn test_path_helpers() {
        let client = Client::new(
            ClientConfig::new("https://cluster:8080", "admin", "secret").with_volumes_path("k8s"),
        )
        .unwrap();
        assert_eq!(client.path("data"), "/ifs/volumes/k8s/data");
        assert_eq!(Client::name_from_path("/ifs/volumes/k8s/data"), "data");
        assert_eq!(Client::name_from_path("data"), "data");
    }

    #[tokio::test]
    async fn test_get_volume_prefers_id() {
        let server = MockServer::start(vec![MockResponse::ok(json!({"attrs": []}))]).await;
        let client = client(&server);

        let volume = client.get_volume("by-id", "by-name").await.unwrap();
        assert_eq!(volume.name, "by-id");
        assert_eq!(server.requests()[0].target, "/namespace/ifs/volumes/by-id?metadata=");
    }

    #[tokio::test]
    async fn test_copy_volume_fetches_destination() {
        let server = MockServer::start(vec![
            MockResponse::empty(),
            MockResponse::ok(json!({"attrs": [{"name": "owner", "value": "admin"}]})),
        ])
        .await;
        let client = client(&server);

        let volume = client.copy_volume("a", "b").await.unwrap();
        assert_eq!(volume.name, "b");

        let requests = server.requests();
        assert_eq!(requests[0].header("x-isi-ifs-copy-source"), Some("/namespace/ifs/volumes/a"));
        assert_eq!(requests[1].target, "/namespace/ifs/volumes/b?metadata=");
    }

    #[tokio::test]
    async fn test_get_export_by_id_or_path() {
        let server = MockServer::start(vec![exports_reply(), exports_reply(), exports_reply()]).await;
        let client = client(&server);

        let by_id = client.get_export(Some(5), "").await.unwrap().unwrap();
        assert_eq!(by_id.id, 5);

        let by_name = client.get_export(None, "b").await.unwrap().unwrap();
        assert_eq!(by_name.id, 5);

        assert!(client.get_export(None, "zzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_export_skips_exported_volume() {
        let server = MockServer::start(vec![exports_reply()]).await;
        let client = client(&server);

        client.export("a").await.unwrap();
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_export_creates_missing_export() {
        let server = MockServer::start(vec![exports_reply(), MockResponse::ok(json!({"id": 9}))]).await;
        let client = client(&server);

        client.export_volume("c").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, "POST");
        assert_eq!(requests[1].json()["paths"], json!(["/ifs/volumes/c"]));
    }

    #[tokio::test]
    async fn test_export_clients() {
        let server = MockServer::start(vec![exports_reply(), exports_reply()]).await;
        let client = client(&server);

        assert_eq!(
            client.get_export_clients("a").await.unwrap(),
            Some(vec!["10.0.0.1".to_string()])
        );
        assert_eq!(client.get_export_clients("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_export_clients() {
        let server = MockServer::start(vec![exports_reply(), MockResponse::empty()]).await;
        let client = client(&server);

        client.clear_export_clients("a").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests[1].method, "PUT");
        assert_eq!(requests[1].target, "/platform/1/protocols/nfs/exports/4");
        assert_eq!(requests[1].json(), json!({"clients": []}));
    }

    #[tokio::test]
    async fn test_unexport_missing_is_noop() {
        let server = MockServer::start(vec![exports_reply()]).await;
        let client = client(&server);

        client.unexport_volume("missing").await.unwrap();
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unexport_by_name() {
        let server = MockServer::start(vec![exports_reply(), MockResponse::empty()]).await;
        let client = client(&server);

        client.unexport("b").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests[1].method, "DELETE");
        assert_eq!(requests[1].target, "/platform/1/protocols/nfs/exports/5");
    }

    #[tokio::test]
    async fn test_get_volume_exports_joins_by_path() {
        let server = MockServer::start(vec![
            exports_reply(),
            MockResponse::ok(json!({"children": [{"name": "a"}, {"name": "b"}, {"name": "c"}]})),
        ])
        .await;
        let client = client(&server);

        let joined = client.get_volume_exports().await.unwrap();
        assert_eq!(
            joined,
            vec![
                VolumeExport {
                    volume: Volume::new("a"),
                    export_path: "/ifs/volumes/a".into(),
                    clients: vec!["10.0.0.1".into()],
                },
                VolumeExport {
                    volume: Volume::new("b"),
                    export_path: "/ifs/volumes/b".into(),
                    clients: vec![],
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_quota_uses_volume_path() {
        let server = MockServer::start(vec![
            MockResponse::ok(json!({"id": "q1"})),
            MockResponse::empty(),
        ])
        .await;
        let client = client(&server);

        client.set_quota_size("data", 1024).await.unwrap();
        client.clear_quota("data").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].json()["path"], json!("/ifs/volumes/data"));
        assert_eq!(requests[1].target, "/platform/1/quota/quotas?path=%2Fifs%2Fvolumes%2Fdata");
    }

    #[tokio::test]
    async fn test_get_snapshots_by_path() {
        let server = MockServer::start(vec![MockResponse::ok(json!({
            "snapshots": [
                {"id": 1, "name": "s1", "path": "/ifs/volumes/data"},
                {"id": 2, "name": "s2", "path": "/ifs/volumes/other"},
                {"id": 3, "name": "s3", "path": "/ifs/volumes/data"}
            ]
        }))])
        .await;
        let client = client(&server);

        let ids: Vec<i64> = client
            .get_snapshots_by_path("data")
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, [1, 3]);
    }

    #[tokio::test]
    async fn test_get_snapshot_falls_back_to_name() {
        let server = MockServer::start(vec![
            MockResponse::json(404, json!({"errors": [{"code": "AEC_NOT_FOUND", "message": "nope"}]})),
            MockResponse::ok(json!({"snapshots": [{"id": 8, "name": "nightly", "path": "/ifs/volumes/data"}]})),
        ])
        .await;
        let client = client(&server);

        let snapshot = client.get_snapshot(99, "nightly").await.unwrap().unwrap();
        assert_eq!(snapshot.id, 8);
    }

    #[tokio::test]
    async fn test_get_snapshot_without_name_returns_error() {
        let server = MockServer::start(vec![MockResponse::json(
            404,
            json!({"errors": [{"code": "AEC_NOT_FOUND", "message": "nope"}]}),
        )])
        .await;
        let client = client(&server);

        let err = client.get_snapshot(99, "").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_snapshot_by_name() {
        let server = MockServer::start(vec![
            MockResponse::ok(json!({"snapshots": [{"id": 8, "name": "nightly", "path": "/ifs/volumes/data"}]})),
            MockResponse::empty(),
        ])
        .await;
        let client = client(&server);

        // id 0 is rejected locally, so the lookup goes straight to the name scan.
        client.remove_snapshot(0, "nightly").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, "DELETE");
        assert_eq!(requests[1].target, "/platform/1/snapshot/snapshots/8");
    }

    #[tokio::test]
    async fn test_copy_snapshot_missing() {
        let server = MockServer::start(vec![MockResponse::ok(json!({"snapshots": []}))]).await;
        let client = client(&server);

        let err = client.copy_snapshot(0, "nightly", "restored").await.unwrap_err();
        assert_eq!(err.to_string(), "Not found: Snapshot doesn't exist: (0, nightly)");
    }

    #[tokio::test]
    async fn test_copy_snapshot_restores_volume() {
        let server = MockServer::start(vec![
            MockResponse::ok(json!({"snapshots": [{"id": 8, "name": "nightly", "path": "/ifs/volumes/data"}]})),
            MockResponse::empty(),
            MockResponse::ok(json!({"attrs": []})),
        ])
        .await;
        let client = client(&server);

        let volume = client.copy_snapshot(8, "", "restored").await.unwrap();
        assert_eq!(volume.name, "restored");

        let requests = server.requests();
        assert_eq!(requests[0].target, "/platform/1/snapshot/snapshots/8");
        assert_eq!(requests[1].target, "/namespace/ifs/volumes/restored");
        assert_eq!(
            requests[1].header("x-isi-ifs-copy-source"),
            Some("/namespace/ifs/.snapshot/nightly/volumes/data/")
        );
    }
}
