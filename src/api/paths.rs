//! Platform API versions and resource paths.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::IsilonError;

/// Root of the filesystem namespace API.
pub const NAMESPACE_PATH: &str = "namespace";

/// Directory volumes are created in when no volumes path is configured.
pub const DEFAULT_VOLUMES_PATH: &str = "/ifs/volumes";

/// Reports the newest platform API version the cluster speaks.
pub const LATEST_PATH: &str = "platform/latest";

/// Hidden directory through which snapshot contents are reachable.
pub const SNAPSHOT_DIR: &str = ".snapshot";

/// Platform API version. Selects the `platform/{1,2}/...` resource prefixes and
/// the shape of a few request bodies.
///
/// Serializes as `"v1"`/`"v2"`; deserializes from any spelling `FromStr`
/// accepts, or from a bare `1`/`2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

impl ApiVersion {
    pub fn number(self) -> u8 {
        match self {
            ApiVersion::V1 => 1,
            ApiVersion::V2 => 2,
        }
    }

    /// Pick the best supported version for a cluster reporting `latest`.
    pub fn from_latest(latest: u32) -> Self {
        if latest >= 2 {
            ApiVersion::V2
        } else {
            ApiVersion::V1
        }
    }

    pub fn exports_path(self) -> &'static str {
        match self {
            ApiVersion::V1 => "platform/1/protocols/nfs/exports",
            ApiVersion::V2 => "platform/2/protocols/nfs/exports",
        }
    }

    pub fn quotas_path(self) -> &'static str {
        match self {
            ApiVersion::V1 => "platform/1/quota/quotas",
            ApiVersion::V2 => "platform/2/quota/quotas",
        }
    }

    pub fn snapshots_path(self) -> &'static str {
        match self {
            ApiVersion::V1 => "platform/1/snapshot/snapshots",
            ApiVersion::V2 => "platform/2/snapshot/snapshots",
        }
    }

    /// Namespace path under which the contents of snapshot `name` appear.
    ///
    /// Version 1 goes through the cluster-wide `/ifs/.snapshot` tree, version 2
    /// through the `.snapshot` directory of the volumes path itself.
    pub fn volume_snapshot_path(self, namespace_path: &str, name: &str) -> String {
        match self {
            ApiVersion::V1 => match namespace_path.split_once("/ifs/") {
                Some((head, tail)) => format!("{}/ifs/{}/{}/{}", head, SNAPSHOT_DIR, name, tail),
                None => format!("{}/{}/{}", namespace_path, SNAPSHOT_DIR, name),
            },
            ApiVersion::V2 => format!("{}/{}/{}", namespace_path, SNAPSHOT_DIR, name),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for ApiVersion {
    type Err = IsilonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "v1" => Ok(ApiVersion::V1),
            "2" | "v2" => Ok(ApiVersion::V2),
            other => Err(IsilonError::Config(format!(
                "Unsupported API version: {}",
                other
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl Visitor<'_> for VersionVisitor {
            type Value = ApiVersion;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a platform API version: 1, 2, \"v1\" or \"v2\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ApiVersion, E> {
                v.parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ApiVersion, E> {
                match v {
                    1 => Ok(ApiVersion::V1),
                    2 => Ok(ApiVersion::V2),
                    _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ApiVersion, E> {
                match u64::try_from(v) {
                    Ok(v) => self.visit_u64(v),
                    Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
                }
            }
        }

        d.deserialize_any(VersionVisitor)
    }
}

/// Namespace path of the volumes directory, e.g. `namespace/ifs/volumes`.
pub fn namespace_path(volumes_path: &str) -> String {
    format!("{}{}", NAMESPACE_PATH, volumes_path)
}
