//! Snapshot records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A read-only point-in-time copy of a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    /// Creation time, Unix seconds.
    #[serde(default)]
    pub created: i64,
    /// Expiration time, Unix seconds; `None` when the snapshot never expires.
    #[serde(default)]
    pub expires: Option<i64>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub has_locks: bool,
    #[serde(default)]
    pub pct_filesystem: f64,
    #[serde(default)]
    pub pct_reserve: f64,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub shadow_bytes: i64,
    #[serde(default)]
    pub target_id: Option<i64>,
    #[serde(default)]
    pub target_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snapshot {
    pub fn is_active(&self) -> bool {
        self.state == "active"
    }
}

/// Reply of a snapshot listing or single-snapshot lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotList {
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub resume: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SnapshotCreate<'a> {
    pub path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}
