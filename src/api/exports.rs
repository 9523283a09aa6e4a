//! NFS export operations.

use reqwest::Method;
use tracing::info;

use super::client::{ApiClient, NO_BODY};
use super::paths::ApiVersion;
use crate::error::{IsilonError, Result};
use crate::model::export::{
    CreatedExport, Export, ExportClients, ExportCreateV1, ExportCreateV2, ExportList, MapAllV1,
    UserMapping,
};

fn require_id(id: i64) -> Result<String> {
    if id == 0 {
        return Err(IsilonError::InvalidArgument("no path id set".to_string()));
    }
    Ok(id.to_string())
}

impl ApiClient {
    /// List every NFS export on the cluster.
    pub async fn get_exports(&self) -> Result<Vec<Export>> {
        let list: Option<ExportList> = self
            .query(Method::GET, self.api_version().exports_path(), None, &[], NO_BODY)
            .await?;
        Ok(list.map(|l| l.exports).unwrap_or_default())
    }

    /// Fetch one export by id.
    pub async fn get_export(&self, id: i64) -> Result<Export> {
        let id = require_id(id)?;
        let list: Option<ExportList> = self
            .query(
                Method::GET,
                self.api_version().exports_path(),
                Some(id.as_str()),
                &[],
                NO_BODY,
            )
            .await?;

        list.and_then(|l| l.exports.into_iter().next())
            .ok_or_else(|| IsilonError::NotFound(format!("Export not found: {}", id)))
    }

    /// Export `path` over NFS with all access mapped to the configured user
    /// (and group). Returns the id of the new export.
    pub async fn export(&self, path: &str) -> Result<i64> {
        if path.is_empty() {
            return Err(IsilonError::InvalidArgument("no path set".to_string()));
        }

        let exports_path = self.api_version().exports_path();
        let created: Option<CreatedExport> = match self.api_version() {
            ApiVersion::V1 => {
                let body = ExportCreateV1 {
                    paths: vec![path],
                    map_all: MapAllV1 {
                        user: self.username(),
                        groups: self.group().into_iter().collect(),
                    },
                };
                self.query(Method::POST, exports_path, None, &[], Some(&body))
                    .await?
            }
            ApiVersion::V2 => {
                let body = ExportCreateV2 {
                    paths: vec![path],
                    map_all: UserMapping::to_user(self.username(), self.group()),
                };
                self.query(Method::POST, exports_path, None, &[], Some(&body))
                    .await?
            }
        };

        let id = created.ok_or(IsilonError::InvalidResponse)?.id;
        info!(path, id, "created export");
        Ok(id)
    }

    /// Replace the list of clients allowed to mount an export. An empty list
    /// opens the export to everyone.
    pub async fn set_export_clients(&self, id: i64, clients: &[String]) -> Result<()> {
        let id = require_id(id)?;
        self.execute(
            Method::PUT,
            self.api_version().exports_path(),
            Some(id.as_str()),
            &[],
            &[],
            Some(&ExportClients { clients }),
        )
        .await
    }

    /// Remove an export.
    pub async fn unexport(&self, id: i64) -> Result<()> {
        let id = require_id(id)?;
        self.execute(
            Method::DELETE,
            self.api_version().exports_path(),
            Some(id.as_str()),
            &[],
            &[],
            NO_BODY,
        )
        .await?;

        info!(id = %id, "removed export");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonaId;
    use crate::test_support::{MockResponse, MockServer, USERNAME};
    use serde_json::json;

    #[tokio::test]
    async fn test_get_exports() {
        let server = MockServer::start(vec![MockResponse::ok(json!({
            "exports": [
                {"id": 1, "paths": ["/ifs/volumes/a"], "clients": ["10.0.0.1"]},
                {"id": 2, "paths": ["/ifs/volumes/b"], "clients": []}
            ],
            "total": 2
        }))])
        .await;
        let api = server.api(ApiVersion::V1);

        let exports = api.get_exports().await.unwrap();
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0].clients(), ["10.0.0.1"]);
        assert_eq!(server.requests()[0].target, "/platform/1/protocols/nfs/exports");
    }

    #[tokio::test]
    async fn test_get_export_by_id() {
        let server = MockServer::start(vec![MockResponse::ok(json!({
            "exports": [{
                "id": 5,
                "paths": ["/ifs/volumes/a"],
                "map_all": {"enabled": true, "user": {"id": "USER:admin"}}
            }]
        }))])
        .await;
        let api = server.api(ApiVersion::V2);

        let export = api.get_export(5).await.unwrap();
        assert_eq!(export.id, 5);
        assert_eq!(
            export.map_all.unwrap().user,
            Some(PersonaId::user("admin"))
        );
        assert_eq!(server.requests()[0].target, "/platform/2/protocols/nfs/exports/5");
    }

    #[tokio::test]
    async fn test_get_export_empty_list() {
        let server = MockServer::start(vec![MockResponse::ok(json!({"exports": []}))]).await;
        let api = server.api(ApiVersion::V1);

        let err = api.get_export(5).await.unwrap_err();
        assert!(matches!(err, IsilonError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_export_v1_body() {
        let server = MockServer::start(vec![MockResponse::ok(json!({"id": 42}))]).await;
        let api = ApiClient::new(server.config().with_group("staff")).unwrap();

        let id = api.export("/ifs/volumes/a").await.unwrap();
        assert_eq!(id, 42);

        let request = &server.requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.target, "/platform/1/protocols/nfs/exports");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            request.json(),
            json!({
                "paths": ["/ifs/volumes/a"],
                "map_all": {"user": USERNAME, "groups": ["staff"]}
            })
        );
    }

    #[tokio::test]
    async fn test_export_v2_body() {
        let server = MockServer::start(vec![MockResponse::ok(json!({"id": 43}))]).await;
        let api = server.api(ApiVersion::V2);

        assert_eq!(api.export("/ifs/volumes/a").await.unwrap(), 43);

        let request = &server.requests()[0];
        assert_eq!(request.target, "/platform/2/protocols/nfs/exports");
        assert_eq!(
            request.json(),
            json!({
                "paths": ["/ifs/volumes/a"],
                "map_all": {"user": format!("user:{}", USERNAME)}
            })
        );
    }

    #[tokio::test]
    async fn test_export_requires_path() {
        let server = MockServer::start(vec![]).await;
        let api = server.api(ApiVersion::V1);

        let err = api.export("").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: no path set");
    }

    #[tokio::test]
    async fn test_set_export_clients() {
        let server = MockServer::start(vec![MockResponse::empty()]).await;
        let api = server.api(ApiVersion::V1);

        api.set_export_clients(7, &["10.0.0.1".to_string(), "10.0.0.2".to_string()])
            .await
            .unwrap();

        let request = &server.requests()[0];
        assert_eq!(request.method, "PUT");
        assert_eq!(request.target, "/platform/1/protocols/nfs/exports/7");
        assert_eq!(request.json(), json!({"clients": ["10.0.0.1", "10.0.0.2"]}));
    }

    #[tokio::test]
    async fn test_unexport() {
        let server = MockServer::start(vec![MockResponse::empty()]).await;
        let api = server.api(ApiVersion::V1);

        api.unexport(23).await.unwrap();

        let request = &server.requests()[0];
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.target, "/platform/1/protocols/nfs/exports/23");
    }

    #[tokio::test]
    async fn test_zero_id_is_rejected() {
        let server = MockServer::start(vec![]).await;
        let api = server.api(ApiVersion::V1);

        assert!(matches!(api.unexport(0).await, Err(IsilonError::InvalidArgument(_))));
        assert!(matches!(
            api.set_export_clients(0, &[]).await,
            Err(IsilonError::InvalidArgument(_))
        ));
        assert!(server.requests().is_empty());
    }
}
