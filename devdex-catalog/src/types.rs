//! Data model types for the tool directory.
//!
//! A directory is a flat JSON array of [`ItemRecord`]s. Every field except
//! `name` is optional; absent string fields deserialize to empty strings so
//! passes can treat "missing" and "empty" uniformly.

use serde::{Deserialize, Serialize};

fn is_false(v: &bool) -> bool {
    !*v
}

/// A single directory entry: a tool, language, platform, or service.
///
/// Field order here is the serialization order. Empty strings, `false`
/// flags, and `None` are skipped on output so saved files stay minimal and
/// unchanged reruns produce byte-identical JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Display name. The only required field; records with a blank name
    /// are invalid and get dropped by the validity filter.
    #[serde(default)]
    pub name: String,
    /// Canonical homepage. May point at a generic reference source (e.g.
    /// an encyclopedia article) as a placeholder until corrected.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Single category tag from an open vocabulary.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sector: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub popular: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

impl ItemRecord {
    /// Create a record with just a name, everything else defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A record is structurally valid when its name has visible characters.
    pub fn has_valid_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Lifecycle status of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Inactive,
    Discontinued,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Discontinued => "discontinued",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" | "dead" => Some(Self::Inactive),
            "discontinued" | "eol" | "sunset" => Some(Self::Discontinued),
            _ => None,
        }
    }
}
