//! Volume records and namespace ACL request bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A directory under the volumes path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    #[serde(default)]
    pub name: String,
    /// Namespace metadata, only filled in by a volume lookup.
    #[serde(rename = "attrs", default)]
    pub attributes: Vec<VolumeAttribute>,
}

impl Volume {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Value of the named metadata attribute, if reported.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }
}

/// One namespace metadata entry. Values are untyped on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAttribute {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct VolumeList {
    #[serde(default)]
    pub children: Vec<Volume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct VolumeAttributes {
    #[serde(default)]
    pub attrs: Vec<VolumeAttribute>,
}

/// Owner or group entry of an ACL update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Ownership {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "user".to_string(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "group".to_string(),
        }
    }
}

/// Body of `PUT namespace/...?acl` that hands a directory to an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclRequest {
    pub authoritative: String,
    pub action: String,
    pub owner: Ownership,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Ownership>,
}

impl AclRequest {
    /// Authoritative ACL update setting owner and, optionally, group.
    pub fn ownership(owner: &str, group: Option<&str>) -> Self {
        Self {
            authoritative: "acl".to_string(),
            action: "update".to_string(),
            owner: Ownership::user(owner),
            group: group.map(Ownership::group),
        }
    }
}
