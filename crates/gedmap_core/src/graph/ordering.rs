//! Chronological ordering of events and persons.
//!
//! # Invariants
//! - Comparison is lexicographic over `(year, month, day)`.
//! - At each field, an absent value sorts before a present one; two absent
//!   values tie and comparison moves on to the next field.
//! - An absent triple behaves like a triple with every field absent.
//! - Sorting is stable: equal keys keep their prior relative order.

use super::AncestorGraph;
use crate::model::event::{DateTriple, EventRecord};
use crate::model::person::PersonRecord;
use std::cmp::Ordering;

/// Total preorder over optional date triples, missing data first.
pub fn compare_dates(left: Option<&DateTriple>, right: Option<&DateTriple>) -> Ordering {
    let left = left.copied().unwrap_or_default();
    let right = right.copied().unwrap_or_default();

    compare_field(left.year, right.year)
        .then_with(|| compare_field(left.month, right.month))
        .then_with(|| compare_field(left.day, right.day))
}

pub fn compare_events(left: &EventRecord, right: &EventRecord) -> Ordering {
    compare_dates(left.date_triple(), right.date_triple())
}

pub fn compare_persons(left: &PersonRecord, right: &PersonRecord) -> Ordering {
    compare_dates(left.reference_date.as_ref(), right.reference_date.as_ref())
}

/// Stable ascending sort of one event list by parsed date.
pub fn sort_events(events: &mut [EventRecord]) {
    events.sort_by(compare_events);
}

/// Sorts every person's events in place.
pub fn sort_person_events(graph: &mut AncestorGraph) {
    for person in &mut graph.persons {
        sort_events(&mut person.events);
    }
}

/// Stable ascending sort of the person collection by reference date.
pub fn sort_persons(graph: &mut AncestorGraph) {
    graph.persons.sort_by(compare_persons);
}

fn compare_field<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => left.cmp(&right),
    }
}
