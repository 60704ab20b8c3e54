//! Ancestor graph builder.
//!
//! # Responsibility
//! - Create one person per individual and merge family links and events.
//!
//! # Invariants
//! - The first record for an id wins; later duplicates are skipped.
//! - A link is written only when both of its endpoints exist.
//! - A family event is extracted once and appended to every present spouse.

use super::extract::extract_event;
use super::AncestorGraph;
use crate::model::person::{Gender, PersonId, PersonRecord};
use crate::source::{SourceFamily, SourceGraph};
use log::{info, warn};
use std::collections::HashMap;
use std::time::Instant;

/// Counters describing one build run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub persons: usize,
    pub families: usize,
    pub events: usize,
    pub duplicate_individuals: usize,
    pub dangling_references: usize,
}

/// Builds an `AncestorGraph` from a parsed source graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    summary: bool,
}

impl GraphBuilder {
    /// `summary = true` keeps only the primary name of each person.
    pub fn new(summary: bool) -> Self {
        Self { summary }
    }

    pub fn build(&self, source: &SourceGraph) -> AncestorGraph {
        self.build_with_report(source).0
    }

    pub fn build_with_report(&self, source: &SourceGraph) -> (AncestorGraph, BuildReport) {
        let started_at = Instant::now();
        let mut report = BuildReport::default();
        let mut persons: Vec<PersonRecord> = Vec::with_capacity(source.individuals.len());
        let mut index: HashMap<PersonId, usize> = HashMap::with_capacity(source.individuals.len());

        for individual in &source.individuals {
            if index.contains_key(individual.id.as_str()) {
                report.duplicate_individuals += 1;
                warn!(
                    "event=graph_build module=graph status=degraded reason=duplicate_individual id={}",
                    individual.id
                );
                continue;
            }

            let mut person = PersonRecord::new(individual.id.clone());
            person.name = individual.names.first().cloned();
            if !self.summary {
                person.names = individual.names.clone();
            }
            person.gender = Gender::from_sex_code(individual.sex.as_deref());
            for event in &individual.events {
                person.push_event(extract_event(event));
            }

            index.insert(person.id.clone(), persons.len());
            persons.push(person);
        }

        for family in &source.families {
            report.dangling_references += link_family(&mut persons, &index, family);
            report.families += 1;
        }

        report.persons = persons.len();
        report.events = persons.iter().map(|person| person.events.len()).sum();
        info!(
            "event=graph_build module=graph status=ok persons={} families={} events={} duplicates={} dangling={} duration_ms={}",
            report.persons,
            report.families,
            report.events,
            report.duplicate_individuals,
            report.dangling_references,
            started_at.elapsed().as_millis()
        );

        (AncestorGraph::from_persons(persons), report)
    }
}

/// Writes spouse, parent/child links and family events for one family.
///
/// Returns the number of ids that did not resolve to a person.
fn link_family(
    persons: &mut [PersonRecord],
    index: &HashMap<PersonId, usize>,
    family: &SourceFamily,
) -> usize {
    let mut dangling = 0;
    let mut resolve = |id: Option<&String>| -> Option<(usize, PersonId)> {
        let id = id?;
        match index.get(id.as_str()) {
            Some(&slot) => Some((slot, id.clone())),
            None => {
                dangling += 1;
                None
            }
        }
    };

    let wife = resolve(family.wife.as_ref());
    let husband = resolve(family.husband.as_ref());
    let children: Vec<(usize, PersonId)> = family
        .children
        .iter()
        .filter_map(|child| resolve(Some(child)))
        .collect();

    if let (Some((wife_slot, wife_id)), Some((husband_slot, husband_id))) = (&wife, &husband) {
        persons[*wife_slot]
            .relations
            .spouses
            .insert(husband_id.clone());
        persons[*husband_slot]
            .relations
            .spouses
            .insert(wife_id.clone());
    }

    let wife_id = wife.as_ref().map(|(_, id)| id.clone());
    let husband_id = husband.as_ref().map(|(_, id)| id.clone());
    for (child_slot, child_id) in &children {
        if let Some((wife_slot, wife_id)) = &wife {
            persons[*wife_slot]
                .relations
                .children
                .insert(child_id.clone(), husband_id.clone());
            persons[*child_slot].relations.mothers.push(wife_id.clone());
        }
        if let Some((husband_slot, husband_id)) = &husband {
            persons[*husband_slot]
                .relations
                .children
                .insert(child_id.clone(), wife_id.clone());
            persons[*child_slot]
                .relations
                .fathers
                .push(husband_id.clone());
        }
    }

    for source_event in &family.events {
        let event = extract_event(source_event);
        if let Some((wife_slot, _)) = &wife {
            persons[*wife_slot].push_event(event.clone());
        }
        if let Some((husband_slot, _)) = &husband {
            persons[*husband_slot].push_event(event.clone());
        }
    }

    dangling
}
