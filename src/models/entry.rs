//! Gazetteer entry structures as returned by the OS Names API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream field that carries the gazetteer's own identifier.
/// Replaced by the slug on resolved entries.
const UPSTREAM_ID_FIELD: &str = "ID";

/// A single upstream search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "GAZETTEER_ENTRY")]
    pub gazetteer_entry: GazetteerEntry,
}

/// Named fields of a gazetteer record.
///
/// Only the fields the matcher reads are typed. Everything else the upstream
/// sends (`NAMES_URI`, `LOCAL_TYPE`, `POSTCODE_DISTRICT`, coordinates, ...)
/// is kept in `other` and handed back to the caller untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    /// Primary name
    #[serde(rename = "NAME1")]
    pub name1: String,

    /// Alternate name (often the Welsh or Gaelic form, or a fuller name)
    #[serde(rename = "NAME2", default, skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,

    #[serde(
        rename = "DISTRICT_BOROUGH",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub district_borough: Option<String>,

    #[serde(
        rename = "COUNTY_UNITARY",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub county_unitary: Option<String>,

    /// Remaining upstream fields, sorted by key
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl GazetteerEntry {
    /// Create an entry with just a primary name
    pub fn new(name1: impl Into<String>) -> Self {
        Self {
            name1: name1.into(),
            name2: None,
            district_borough: None,
            county_unitary: None,
            other: Map::new(),
        }
    }

    /// Administrative region used for display: district/borough first,
    /// county/unitary authority otherwise.
    pub fn region(&self) -> &str {
        non_empty(&self.district_borough)
            .or_else(|| non_empty(&self.county_unitary))
            .unwrap_or_default()
    }

    /// Name shown in listings: the alternate name when there is one.
    pub fn display_name(&self) -> &str {
        non_empty(&self.name2).unwrap_or(&self.name1)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl RawEntry {
    pub fn new(gazetteer_entry: GazetteerEntry) -> Self {
        Self { gazetteer_entry }
    }
}

/// An entry selected for display, carrying its slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    #[serde(rename = "GAZETTEER_ENTRY")]
    pub gazetteer_entry: ResolvedGazetteerEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGazetteerEntry {
    /// Slug identifying the entry, e.g. `"oxford-oxfordshire"`
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(flatten)]
    pub entry: GazetteerEntry,
}

impl ResolvedEntry {
    /// Build a resolved entry from a copy of the upstream fields.
    pub fn new(mut entry: GazetteerEntry, id: String) -> Self {
        entry.other.remove(UPSTREAM_ID_FIELD);
        Self {
            gazetteer_entry: ResolvedGazetteerEntry { id, entry },
        }
    }

    pub fn id(&self) -> &str {
        &self.gazetteer_entry.id
    }

    pub fn name1(&self) -> &str {
        &self.gazetteer_entry.entry.name1
    }
}
