//! Parsed GEDCOM graph consumed by the pipeline.
//!
//! # Responsibility
//! - Describe the minimum surface a GEDCOM parser must expose.
//! - Load parsed-graph snapshots from disk before any stage runs.
//!
//! # Invariants
//! - Loading either yields a complete graph or fails; there is no partial graph.

mod loader;

pub use loader::{load_source_graph, SourceError, SourceResult};

use serde::{Deserialize, Serialize};

/// Individuals and families exactly as the parser produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGraph {
    #[serde(default)]
    pub individuals: Vec<SourceIndividual>,
    #[serde(default)]
    pub families: Vec<SourceFamily>,
}

impl SourceGraph {
    /// Parses an in-memory JSON snapshot.
    pub fn from_json_str(text: &str) -> SourceResult<Self> {
        serde_json::from_str(text).map_err(|source| SourceError::Malformed { path: None, source })
    }
}

/// `INDI` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceIndividual {
    pub id: String,
    #[serde(default)]
    pub names: Vec<String>,
    /// Raw `SEX` value, when present.
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub events: Vec<SourceEvent>,
}

impl SourceIndividual {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    pub fn with_event(mut self, event: SourceEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// `FAM` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFamily {
    #[serde(default)]
    pub wife: Option<String>,
    #[serde(default, alias = "husb")]
    pub husband: Option<String>,
    #[serde(default, alias = "chil")]
    pub children: Vec<String>,
    #[serde(default)]
    pub events: Vec<SourceEvent>,
}

impl SourceFamily {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wife(mut self, id: impl Into<String>) -> Self {
        self.wife = Some(id.into());
        self
    }

    pub fn with_husband(mut self, id: impl Into<String>) -> Self {
        self.husband = Some(id.into());
        self
    }

    pub fn with_child(mut self, id: impl Into<String>) -> Self {
        self.children.push(id.into());
        self
    }

    pub fn with_event(mut self, event: SourceEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Individual- or family-level event record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "plac")]
    pub place: Option<String>,
}

impl SourceEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            date: None,
            place: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }
}
