//! Reference date and place selection.
//!
//! # Responsibility
//! - Pick one representative date and place per person.
//! - Keep the place policy swappable without touching other stages.
//!
//! # Invariants
//! - The reference date comes from the first dated event in sorted order.
//! - Place policies scan events in source order, not date order.
//! - Selection overwrites previous reference values, so re-running is safe.

use super::AncestorGraph;
use crate::model::event::{
    DateTriple, EventRecord, PlaceRecord, EVENT_ADOPTION, EVENT_BAPTISM, EVENT_BIRTH,
    EVENT_BLESSING,
};
use crate::model::person::PersonRecord;
use serde::{Deserialize, Serialize};

/// Preferred event types for `PlacePolicy::TypePriority`, best first.
pub const DEFAULT_PLACE_PRIORITY: &[&str] =
    &[EVENT_BIRTH, EVENT_BAPTISM, EVENT_ADOPTION, EVENT_BLESSING];

/// Strategy contract for choosing a person's reference place.
pub trait PlaceSelector {
    fn select_place(&self, events: &[EventRecord]) -> Option<PlaceRecord>;
}

/// Built-in place policies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacePolicy {
    /// First event with any place, geocoded or not.
    #[default]
    FirstPlace,
    /// First event whose place carries a coordinate. Scans in source order,
    /// like `FirstPlace`, so both policies agree once every place is geocoded.
    FirstGeocoded,
    /// Geocoded place of the best-ranked event type; unlisted types rank last.
    TypePriority(Vec<String>),
}

impl PlacePolicy {
    /// `TypePriority` with `DEFAULT_PLACE_PRIORITY`.
    pub fn default_type_priority() -> Self {
        Self::TypePriority(
            DEFAULT_PLACE_PRIORITY
                .iter()
                .map(|code| code.to_string())
                .collect(),
        )
    }

    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstPlace => "first_place",
            Self::FirstGeocoded => "first_geocoded",
            Self::TypePriority(_) => "type_priority",
        }
    }

    /// Whether the policy only considers geocoded places.
    pub fn needs_coordinates(&self) -> bool {
        !matches!(self, Self::FirstPlace)
    }
}

impl PlaceSelector for PlacePolicy {
    fn select_place(&self, events: &[EventRecord]) -> Option<PlaceRecord> {
        let ordered = in_source_order(events);
        match self {
            Self::FirstPlace => ordered
                .into_iter()
                .find_map(|event| event.place.as_ref())
                .cloned(),
            Self::FirstGeocoded => ordered
                .into_iter()
                .find_map(EventRecord::geocoded_place)
                .cloned(),
            Self::TypePriority(priority) => select_by_type_priority(&ordered, priority),
        }
    }
}

impl<S: PlaceSelector + ?Sized> PlaceSelector for &S {
    fn select_place(&self, events: &[EventRecord]) -> Option<PlaceRecord> {
        (**self).select_place(events)
    }
}

/// First parsed date in the current (sorted) event order.
pub fn select_reference_date(events: &[EventRecord]) -> Option<DateTriple> {
    events.iter().find_map(|event| event.date_triple().copied())
}

/// Applies reference selection with an injected place policy.
pub struct ReferenceSelector<P: PlaceSelector> {
    policy: P,
}

impl<P: PlaceSelector> ReferenceSelector<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn apply(&self, person: &mut PersonRecord) {
        person.reference_date = select_reference_date(&person.events);
        person.reference_place = self.policy.select_place(&person.events);
    }

    /// Applies selection to every person; returns how many got a place.
    pub fn apply_all(&self, graph: &mut AncestorGraph) -> usize {
        let mut placed = 0;
        for person in &mut graph.persons {
            self.apply(person);
            if person.reference_place.is_some() {
                placed += 1;
            }
        }
        placed
    }
}

fn in_source_order(events: &[EventRecord]) -> Vec<&EventRecord> {
    let mut ordered: Vec<&EventRecord> = events.iter().collect();
    ordered.sort_by_key(|event| event.sequence());
    ordered
}

fn select_by_type_priority(events: &[&EventRecord], priority: &[String]) -> Option<PlaceRecord> {
    let mut best: Option<(usize, &PlaceRecord)> = None;
    for event in events {
        let Some(place) = event.geocoded_place() else {
            continue;
        };
        let rank = priority
            .iter()
            .position(|code| code == &event.kind)
            .unwrap_or(priority.len());
        if best.map_or(true, |(best_rank, _)| rank < best_rank) {
            best = Some((rank, place));
        }
    }
    best.map(|(_, place)| place.clone())
}
