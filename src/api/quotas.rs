//! Directory quota operations.

use reqwest::Method;
use tracing::info;

use super::client::{ApiClient, NO_BODY};
use crate::error::{IsilonError, Result};
use crate::model::quota::{Quota, QuotaCreate, QuotaList, QuotaThresholds, QuotaUpdate};

impl ApiClient {
    /// List every quota on the cluster.
    pub async fn get_quotas(&self) -> Result<Vec<Quota>> {
        let list: Option<QuotaList> = self
            .query(Method::GET, self.api_version().quotas_path(), None, &[], NO_BODY)
            .await?;
        Ok(list.map(|l| l.quotas).unwrap_or_default())
    }

    /// Find the quota attached to `path`.
    pub async fn get_quota(&self, path: &str) -> Result<Quota> {
        self.get_quotas()
            .await?
            .into_iter()
            .find(|q| q.path == path)
            .ok_or_else(|| IsilonError::NotFound(format!("Quota not found: {}", path)))
    }

    /// Create an enforced directory quota with only a hard limit.
    pub async fn set_quota_hard_threshold(&self, path: &str, size: i64) -> Result<()> {
        self.set_quota_thresholds(path, QuotaThresholds::hard(size))
            .await
    }

    /// Create an enforced directory quota.
    pub async fn set_quota_thresholds(&self, path: &str, thresholds: QuotaThresholds) -> Result<()> {
        if path.is_empty() {
            return Err(IsilonError::InvalidArgument("no path set".to_string()));
        }

        let body = QuotaCreate::directory(path, thresholds);
        self.execute(
            Method::POST,
            self.api_version().quotas_path(),
            None,
            &[],
            &[],
            Some(&body),
        )
        .await?;

        info!(path, hard = ?thresholds.hard, "set quota");
        Ok(())
    }

    /// Replace the hard limit of the quota on `path`.
    pub async fn update_quota_hard_threshold(&self, path: &str, size: i64) -> Result<()> {
        self.update_quota_thresholds(path, QuotaThresholds::hard(size))
            .await
    }

    /// Replace the thresholds of the quota on `path`.
    pub async fn update_quota_thresholds(
        &self,
        path: &str,
        thresholds: QuotaThresholds,
    ) -> Result<()> {
        let quota = self.get_quota(path).await?;

        self.execute(
            Method::PUT,
            self.api_version().quotas_path(),
            Some(quota.id.as_str()),
            &[],
            &[],
            Some(&QuotaUpdate::enforced(thresholds)),
        )
        .await?;

        info!(path, id = %quota.id, hard = ?thresholds.hard, "updated quota");
        Ok(())
    }

    /// Remove the quota on `path`.
    pub async fn delete_quota(&self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(IsilonError::InvalidArgument("no path set".to_string()));
        }

        self.execute(
            Method::DELETE,
            self.api_version().quotas_path(),
            None,
            &[("path", path)],
            &[],
            NO_BODY,
        )
        .await
    }
}
