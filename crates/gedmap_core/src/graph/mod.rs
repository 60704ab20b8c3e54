//! Ancestor graph construction and normalization stages.
//!
//! # Responsibility
//! - Build one `PersonRecord` per source individual with merged family data.
//! - Normalize dates, order events and persons, pick reference date/place.
//! - Reduce events to significant types in summary mode.
//!
//! # Invariants
//! - Stages run one after another over the same owned `AncestorGraph`.
//! - No stage fails on ambiguous data; ambiguity resolves to an absent field.

pub mod builder;
pub mod date;
pub mod extract;
pub mod ordering;
pub mod reference;
pub mod summary;

use crate::model::person::PersonRecord;

/// Person collection passed from stage to stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AncestorGraph {
    pub(crate) persons: Vec<PersonRecord>,
}

impl AncestorGraph {
    pub fn from_persons(persons: Vec<PersonRecord>) -> Self {
        Self { persons }
    }

    pub fn persons(&self) -> &[PersonRecord] {
        &self.persons
    }

    pub fn persons_mut(&mut self) -> &mut [PersonRecord] {
        &mut self.persons
    }

    pub fn into_persons(self) -> Vec<PersonRecord> {
        self.persons
    }

    pub fn get(&self, id: &str) -> Option<&PersonRecord> {
        self.persons.iter().find(|person| person.id == id)
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Parses every raw event date in place.
    ///
    /// Returns the number of dates that produced a triple. Unparseable dates
    /// keep their raw text and stay without a triple.
    pub fn normalize_dates(&mut self) -> usize {
        let mut parsed = 0;
        for person in &mut self.persons {
            for event in &mut person.events {
                if let Some(date) = event.date.as_mut() {
                    date.parsed = date::normalize_date(&date.raw).and_then(|t| t.into_present());
                    if date.parsed.is_some() {
                        parsed += 1;
                    }
                }
            }
        }
        parsed
    }
}
