//! Connection configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::api::paths::{ApiVersion, DEFAULT_VOLUMES_PATH};
use crate::error::{IsilonError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings needed to talk to a cluster.
///
/// Build one with [`ClientConfig::new`] and the `with_*` methods, load it from
/// the `ISILON_*` environment variables with [`ClientConfig::from_env`], or
/// deserialize it as part of an application config file.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the platform API, e.g. `https://1.2.3.4:8080`.
    pub endpoint: String,
    pub username: String,
    pub password: String,
    /// Group that owns created volumes and is mapped on exports.
    #[serde(default)]
    pub group: Option<String>,
    /// Directory holding the volumes, relative to `/ifs/volumes` unless empty.
    #[serde(default)]
    pub volumes_path: String,
    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,
    #[serde(default = "default_timeout", with = "timeout_secs")]
    pub timeout: Duration,
    /// Platform API version; detected from the cluster when unset.
    #[serde(default)]
    pub api_version: Option<ApiVersion>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("group", &self.group)
            .field("volumes_path", &self.volumes_path)
            .field("insecure", &self.insecure)
            .field("timeout", &self.timeout)
            .field("api_version", &self.api_version)
            .finish()
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

mod timeout_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}

impl ClientConfig {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            group: None,
            volumes_path: String::new(),
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
            api_version: None,
        }
    }

    /// Load settings from the environment.
    ///
    /// | Variable | Meaning |
    /// | --- | --- |
    /// | `ISILON_ENDPOINT` | API base URL |
    /// | `ISILON_USERNAME` / `ISILON_PASSWORD` | basic auth credentials |
    /// | `ISILON_GROUP` | owning group |
    /// | `ISILON_VOLUMEPATH` | volumes directory |
    /// | `ISILON_INSECURE` | `true` to skip TLS verification |
    /// | `ISILON_TIMEOUT` | request timeout in seconds |
    /// | `ISILON_API_VERSION` | `1` or `2` |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).unwrap_or_default();

        let mut config = Self::new(
            var("ISILON_ENDPOINT"),
            var("ISILON_USERNAME"),
            var("ISILON_PASSWORD"),
        )
        .with_volumes_path(var("ISILON_VOLUMEPATH"))
        .with_insecure(parse_bool(&var("ISILON_INSECURE")));

        let group = var("ISILON_GROUP");
        if !group.is_empty() {
            config = config.with_group(group);
        }

        let timeout = var("ISILON_TIMEOUT");
        if !timeout.is_empty() {
            let secs: u64 = timeout.parse().map_err(|_| {
                IsilonError::Config(format!("Invalid ISILON_TIMEOUT: {}", timeout))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        let version = var("ISILON_API_VERSION");
        if !version.is_empty() {
            config = config.with_api_version(version.parse()?);
        }

        Ok(config)
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_volumes_path(mut self, path: impl Into<String>) -> Self {
        self.volumes_path = path.into();
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Check that the required connection settings are present.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() || self.username.is_empty() || self.password.is_empty() {
            return Err(IsilonError::Config(
                "Missing endpoint, username, or password".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute volumes directory on the cluster.
    pub fn resolved_volumes_path(&self) -> String {
        normalize_volumes_path(&self.volumes_path)
    }

    /// Configured group, treating an empty string as unset.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref().filter(|g| !g.is_empty())
    }
}

/// Boolean flag as written in environment variables: `1`, `t`, `true` (any
/// case) and their false counterparts. Anything else reads as false.
fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

/// Resolve a configured volumes path against `/ifs/volumes`.
pub fn normalize_volumes_path(path: &str) -> String {
    if path.is_empty() {
        DEFAULT_VOLUMES_PATH.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", DEFAULT_VOLUMES_PATH, path)
    } else {
        format!("{}/{}", DEFAULT_VOLUMES_PATH, path)
    }
}
