//! Quota records and request bodies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a quota is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuotaType {
    #[default]
    Directory,
    User,
    Group,
    DefaultUser,
    DefaultGroup,
    #[serde(other)]
    Other,
}

/// Enforcement thresholds and their exceeded state as reported by the cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default)]
    pub advisory: Option<i64>,
    #[serde(default)]
    pub advisory_exceeded: bool,
    #[serde(default)]
    pub advisory_last_exceeded: Option<Value>,
    #[serde(default)]
    pub soft: Option<i64>,
    #[serde(default)]
    pub soft_exceeded: bool,
    #[serde(default)]
    pub soft_last_exceeded: Option<Value>,
    #[serde(default)]
    pub hard: Option<i64>,
    #[serde(default)]
    pub hard_exceeded: bool,
    #[serde(default)]
    pub hard_last_exceeded: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Usage counters accounted against a quota.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaUsage {
    #[serde(default)]
    pub inodes: i64,
    #[serde(default)]
    pub logical: i64,
    #[serde(default)]
    pub physical: i64,
}

/// A capacity quota attached to a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quota {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default)]
    pub quota_type: QuotaType,
    #[serde(default)]
    pub enforced: bool,
    #[serde(default)]
    pub container: bool,
    #[serde(default)]
    pub include_snapshots: bool,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub thresholds_include_overhead: bool,
    #[serde(default)]
    pub usage: QuotaUsage,
    #[serde(default)]
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quota {
    /// Hard limit in bytes, if one is set.
    pub fn hard_limit(&self) -> Option<i64> {
        self.thresholds.hard
    }

    pub fn is_directory(&self) -> bool {
        self.quota_type == QuotaType::Directory
    }
}

/// Threshold triple sent when setting or updating a quota. Unset levels go
/// out as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaThresholds {
    pub advisory: Option<i64>,
    pub hard: Option<i64>,
    pub soft: Option<i64>,
}

impl QuotaThresholds {
    /// Only a hard limit.
    pub fn hard(size: i64) -> Self {
        Self {
            hard: Some(size),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct QuotaList {
    #[serde(default)]
    pub quotas: Vec<Quota>,
}

/// Body of a quota creation.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct QuotaCreate<'a> {
    pub enforced: bool,
    pub include_snapshots: bool,
    pub path: &'a str,
    pub thresholds: QuotaThresholds,
    pub thresholds_include_overhead: bool,
    #[serde(rename = "type")]
    pub quota_type: QuotaType,
}

impl<'a> QuotaCreate<'a> {
    /// Enforced directory quota that ignores snapshots and overhead.
    pub fn directory(path: &'a str, thresholds: QuotaThresholds) -> Self {
        Self {
            enforced: true,
            include_snapshots: false,
            path,
            thresholds,
            thresholds_include_overhead: false,
            quota_type: QuotaType::Directory,
        }
    }
}

/// Body of a quota modification.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct QuotaUpdate {
    pub enforced: bool,
    pub thresholds: QuotaThresholds,
    pub thresholds_include_overhead: bool,
}

impl QuotaUpdate {
    pub fn enforced(thresholds: QuotaThresholds) -> Self {
        Self {
            enforced: true,
            thresholds,
            thresholds_include_overhead: false,
        }
    }
}
