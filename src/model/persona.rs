//! Persona identifiers used by export user mappings.
//!
//! On the wire a persona is either the compact string `"user:akutz"` /
//! `"UID:1000"` or an object `{"id": "UID:1000", "name": ..., "type": ...}`.
//! Identifiers always encode to the compact string form.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Kind of identity a persona id names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonaIdType {
    User,
    Group,
    Uid,
    Gid,
}

impl PersonaIdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaIdType::User => "user",
            PersonaIdType::Group => "group",
            PersonaIdType::Uid => "uid",
            PersonaIdType::Gid => "gid",
        }
    }

    /// Case-insensitive parse; `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Some(PersonaIdType::User),
            "group" => Some(PersonaIdType::Group),
            "uid" => Some(PersonaIdType::Uid),
            "gid" => Some(PersonaIdType::Gid),
            _ => None,
        }
    }
}

impl fmt::Display for PersonaIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PersonaIdType {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PersonaIdType {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        PersonaIdType::parse(&s)
            .ok_or_else(|| de::Error::custom(format!("unknown persona id type: {}", s)))
    }
}

/// A user or group reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonaId {
    pub id: String,
    pub id_type: Option<PersonaIdType>,
}

impl PersonaId {
    pub fn new(id_type: PersonaIdType, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            id_type: Some(id_type),
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::new(PersonaIdType::User, name)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(PersonaIdType::Group, name)
    }

    pub fn uid(uid: u32) -> Self {
        Self::new(PersonaIdType::Uid, uid.to_string())
    }

    pub fn gid(gid: u32) -> Self {
        Self::new(PersonaIdType::Gid, gid.to_string())
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id_type {
            Some(t) => write!(f, "{}:{}", t, self.id),
            None => f.write_str(&self.id),
        }
    }
}

impl FromStr for PersonaId {
    type Err = std::convert::Infallible;

    /// `type:id` when the prefix names a known type, otherwise an untyped id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((prefix, id)) = s.split_once(':') {
            if let Some(id_type) = PersonaIdType::parse(prefix) {
                return Ok(Self::new(id_type, id));
            }
        }
        Ok(Self {
            id: s.to_string(),
            id_type: None,
        })
    }
}

impl Serialize for PersonaId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PersonaId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        match Value::deserialize(d)? {
            Value::String(s) => Ok(parse_id(&s)),
            Value::Object(obj) => from_object(&obj).map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "persona id must be a string or object, got {}",
                other
            ))),
        }
    }
}

fn parse_id(s: &str) -> PersonaId {
    match s.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

fn from_object(obj: &Map<String, Value>) -> Result<PersonaId, String> {
    let type_field = obj
        .get("type")
        .and_then(Value::as_str)
        .and_then(PersonaIdType::parse);

    let mut persona = match obj.get("id").and_then(Value::as_str) {
        Some(id) => parse_id(id),
        None => match obj.get("name").and_then(Value::as_str) {
            Some(name) => PersonaId {
                id: name.to_string(),
                id_type: None,
            },
            None => return Err("persona object has neither id nor name".to_string()),
        },
    };

    if persona.id_type.is_none() {
        persona.id_type = type_field;
    }
    Ok(persona)
}
