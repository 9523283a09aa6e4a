//! Platform API client with request/response handling.

use std::fmt;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::error::ApiError;
use super::paths::{self, ApiVersion, LATEST_PATH};
use crate::config::ClientConfig;
use crate::error::{IsilonError, Result};
use crate::http::{format_auth_header, HttpClient};

/// Placeholder for requests without a body.
pub(crate) const NO_BODY: Option<&()> = None;

#[derive(Debug, Deserialize)]
struct LatestVersion {
    latest: String,
}

/// Platform API client.
///
/// Holds connection settings only; every call is a single independent
/// request/response round trip.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    endpoint: String,
    username: String,
    group: Option<String>,
    auth_header: String,
    volumes_path: String,
    namespace_path: String,
    version: ApiVersion,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("group", &self.group)
            .field("volumes_path", &self.volumes_path)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client without contacting the cluster.
    ///
    /// Uses version 1 of the platform API unless the config names one.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = HttpClient::new(config.insecure, config.timeout)?;
        let volumes_path = config.resolved_volumes_path();

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            auth_header: format_auth_header(&config.username, &config.password),
            group: config.group().map(str::to_string),
            username: config.username,
            namespace_path: paths::namespace_path(&volumes_path),
            volumes_path,
            version: config.api_version.unwrap_or_default(),
        })
    }

    /// Create a client, asking the cluster for its API version when the
    /// config leaves it unset.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let detect = config.api_version.is_none();
        let mut client = Self::new(config)?;
        if detect {
            client.version = client.detect_version().await?;
            debug!(version = %client.version, "detected platform API version");
        }
        Ok(client)
    }

    /// Query `platform/latest` and map it onto a supported version.
    pub async fn detect_version(&self) -> Result<ApiVersion> {
        let latest: LatestVersion = self
            .query(Method::GET, LATEST_PATH, None, &[], NO_BODY)
            .await?
            .ok_or(IsilonError::InvalidResponse)?;

        let number: u32 = latest.latest.trim().parse().map_err(|_| {
            IsilonError::Config(format!("Unexpected platform version: {}", latest.latest))
        })?;
        Ok(ApiVersion::from_latest(number))
    }

    pub fn api_version(&self) -> ApiVersion {
        self.version
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Absolute volumes directory, e.g. `/ifs/volumes`.
    pub fn volumes_path(&self) -> &str {
        &self.volumes_path
    }

    /// Namespace path of the volumes directory, e.g. `namespace/ifs/volumes`.
    pub fn namespace_path(&self) -> &str {
        &self.namespace_path
    }

    /// Namespace path under which the contents of snapshot `name` appear.
    pub fn volume_snapshot_path(&self, name: &str) -> String {
        self.version.volume_snapshot_path(&self.namespace_path, name)
    }

    /// Build `endpoint/path[/id][?params]`.
    pub(crate) fn url(&self, path: &str, id: Option<&str>, params: &[(&str, &str)]) -> Result<Url> {
        let mut raw = format!("{}/{}", self.endpoint, path.trim_start_matches('/'));
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            raw.push('/');
            raw.push_str(id);
        }

        let mut url = Url::parse(&raw)
            .map_err(|e| IsilonError::Config(format!("Invalid URL {}: {}", raw, e)))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// Send a request to the cluster.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Resource path relative to the endpoint
    /// * `id` - Optional trailing path segment (resource id or name)
    /// * `params` - Query parameters; empty values render as `key=`
    /// * `body` - JSON request body
    ///
    /// # Returns
    /// The decoded reply, or `None` when a successful reply had no body.
    pub async fn query<B, R>(
        &self,
        method: Method,
        path: &str,
        id: Option<&str>,
        params: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.query_with_headers(method, path, id, params, &[], body)
            .await
    }

    /// Same as `query` but with extra request headers.
    pub async fn query_with_headers<B, R>(
        &self,
        method: Method,
        path: &str,
        id: Option<&str>,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path, id, params)?;
        let body = body.map(|b| serde_json::to_vec(b)).transpose()?;

        debug!(method = %method, url = %url, "papi request");
        if let Some(body) = &body {
            trace!(body = %String::from_utf8_lossy(body), "papi request body");
        }

        let response = self
            .http
            .execute(method.clone(), url, &self.auth_header, headers, body)
            .await?;

        debug!(
            method = %method,
            status = response.status.as_u16(),
            bytes = response.body.len(),
            "papi response"
        );
        trace!(body = %response.body, "papi response body");

        if !response.is_success() {
            let err = ApiError::from_body(response.status.as_u16(), &response.body);
            warn!(status = err.status_code, code = err.code(), error = err.message(), "papi error");
            return Err(err.into());
        }

        if response.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&response.body)?))
    }

    /// Send a request whose reply body is irrelevant; only the status counts.
    pub(crate) async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        id: Option<&str>,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.query_with_headers::<B, serde::de::IgnoredAny>(method, path, id, params, headers, body)
            .await
            .map(|_| ())
    }
}
