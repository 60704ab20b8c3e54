//! Summary-mode event filtering.
//!
//! # Invariants
//! - Only events whose type is in the allow-list survive.
//! - Reference date/place are left untouched.
//! - Filtering twice with the same allow-list changes nothing.

use super::AncestorGraph;
use crate::model::event::{EVENT_BIRTH, EVENT_DEATH, EVENT_DIVORCE, EVENT_MARRIAGE};
use crate::model::person::PersonRecord;
use log::debug;

/// Event types kept in summary output.
pub const DEFAULT_SUMMARY_EVENT_TYPES: &[&str] =
    &[EVENT_BIRTH, EVENT_DEATH, EVENT_MARRIAGE, EVENT_DIVORCE];

/// `DEFAULT_SUMMARY_EVENT_TYPES` as owned strings.
pub fn default_summary_event_types() -> Vec<String> {
    DEFAULT_SUMMARY_EVENT_TYPES
        .iter()
        .map(|code| code.to_string())
        .collect()
}

/// Drops non-significant events from one person. Returns the removed count.
pub fn filter_person(person: &mut PersonRecord, allowed: &[String]) -> usize {
    let before = person.events.len();
    person
        .events
        .retain(|event| allowed.iter().any(|code| code == &event.kind));
    before - person.events.len()
}

/// Applies `filter_person` to the whole graph. Returns the removed count.
pub fn apply_summary_filter(graph: &mut AncestorGraph, allowed: &[String]) -> usize {
    let removed: usize = graph
        .persons
        .iter_mut()
        .map(|person| filter_person(person, allowed))
        .sum();
    debug!(
        "event=summary_filter module=graph status=ok removed_events={} allowed={}",
        removed,
        allowed.join(",")
    );
    removed
}
