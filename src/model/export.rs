//! NFS export records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::persona::PersonaId;

/// An NFS export registration.
///
/// Only the commonly used settings are typed; everything else the cluster
/// reports is kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Export {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_clients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_clients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_write_clients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_all: Option<UserMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_root: Option<UserMapping>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Export {
    /// Allowed client addresses; empty when unrestricted.
    pub fn clients(&self) -> &[String] {
        self.clients.as_deref().unwrap_or_default()
    }

    pub fn has_path(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

/// Identity that requests from an export's clients are mapped to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PersonaId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_group: Option<PersonaId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_groups: Option<Vec<PersonaId>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserMapping {
    /// Map everything to `user`, optionally with a primary group.
    pub fn to_user(user: &str, group: Option<&str>) -> Self {
        Self {
            user: Some(PersonaId::user(user)),
            primary_group: group.map(PersonaId::group),
            ..Default::default()
        }
    }
}

/// Reply of an export listing or single-export lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportList {
    #[serde(default)]
    pub exports: Vec<Export>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedExport {
    pub id: i64,
}

/// Version 1 creation body: plain user and group names.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExportCreateV1<'a> {
    pub paths: Vec<&'a str>,
    pub map_all: MapAllV1<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MapAllV1<'a> {
    pub user: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<&'a str>,
}

/// Version 2 creation body: persona-typed mapping.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExportCreateV2<'a> {
    pub paths: Vec<&'a str>,
    pub map_all: UserMapping,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExportClients<'a> {
    pub clients: &'a [String],
}
