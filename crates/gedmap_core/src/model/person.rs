//! Person record and relationship links.
//!
//! # Responsibility
//! - Hold one individual with events, relations and derived references.
//!
//! # Invariants
//! - `id` comes from the source graph and is never reassigned.
//! - Relation collections only grow during graph construction.
//! - An empty `events` list is never serialized.

use crate::model::event::{DateTriple, EventRecord, PlaceRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Stable source-graph identifier (GEDCOM xref such as `@I1@`).
pub type PersonId = String;

/// Recorded sex of an individual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[default]
    #[serde(rename = "U")]
    Unknown,
}

impl Gender {
    /// Maps a GEDCOM `SEX` value; anything unrecognized is `Unknown`.
    pub fn from_sex_code(code: Option<&str>) -> Self {
        match code.map(|value| value.trim().to_ascii_uppercase()).as_deref() {
            Some("M") => Self::Male,
            Some("F") => Self::Female,
            _ => Self::Unknown,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Unknown => "U",
        }
    }
}

/// Links from one person to the rest of the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relations {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub spouses: BTreeSet<PersonId>,
    /// Child id -> co-parent id. The co-parent is absent for one-parent families.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<PersonId, Option<PersonId>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mothers: Vec<PersonId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fathers: Vec<PersonId>,
}

impl Relations {
    pub fn is_empty(&self) -> bool {
        self.spouses.is_empty()
            && self.children.is_empty()
            && self.mothers.is_empty()
            && self.fathers.is_empty()
    }
}

/// One individual of the ancestor graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: PersonId,
    /// Primary (first listed) name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Every listed name in source order. Empty in summary mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRecord>,
    #[serde(default, skip_serializing_if = "Relations::is_empty")]
    pub relations: Relations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<DateTriple>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_place: Option<PlaceRecord>,
}

impl PersonRecord {
    pub fn new(id: impl Into<PersonId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            names: Vec::new(),
            gender: Gender::Unknown,
            events: Vec::new(),
            relations: Relations::default(),
            reference_date: None,
            reference_place: None,
        }
    }

    /// Appends an event and stamps its source-order position.
    pub fn push_event(&mut self, mut event: EventRecord) {
        event.sequence = self.events.len();
        self.events.push(event);
    }
}
