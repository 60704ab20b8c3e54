//! Merge of batch geocoding results into the ancestor graph.
//!
//! # Invariants
//! - Each distinct raw place string is requested at most once per run.
//! - Every event whose raw place is in the result gets that coordinate.
//! - On backend failure the graph is left untouched.

use super::{GeocodeResult, GeocodeTable, Geocoder};
use crate::graph::AncestorGraph;
use log::{error, info};
use std::collections::BTreeSet;
use std::time::Instant;

/// Counters describing one merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeocodeReport {
    /// Distinct raw place strings sent to the backend.
    pub distinct_places: usize,
    /// Places the backend resolved.
    pub resolved_places: usize,
    /// Events that received a coordinate.
    pub events_updated: usize,
}

/// Distinct raw place strings across every event of every person.
pub fn collect_places(graph: &AncestorGraph) -> BTreeSet<String> {
    graph
        .persons()
        .iter()
        .flat_map(|person| person.events.iter())
        .filter_map(|event| event.place.as_ref())
        .map(|place| place.raw.clone())
        .collect()
}

/// Attaches coordinates from `table` to matching event places.
///
/// Returns the number of events updated.
pub fn attach_coordinates(graph: &mut AncestorGraph, table: &GeocodeTable) -> usize {
    let mut updated = 0;
    for person in graph.persons_mut() {
        for event in &mut person.events {
            let Some(place) = event.place.as_mut() else {
                continue;
            };
            if let Some(coordinate) = table.get(place.raw.as_str()) {
                place.geo = Some(*coordinate);
                updated += 1;
            }
        }
    }
    updated
}

/// Collects places, issues one batch lookup and merges the results.
///
/// A graph without places never reaches the backend.
///
/// # Errors
/// - Propagates the backend error; no event is modified in that case.
pub fn merge_geocodes<G: Geocoder + ?Sized>(
    graph: &mut AncestorGraph,
    geocoder: &G,
) -> GeocodeResult<GeocodeReport> {
    let started_at = Instant::now();
    let places = collect_places(graph);
    if places.is_empty() {
        info!("event=geocode_merge module=geocode status=ok distinct_places=0 skipped=true");
        return Ok(GeocodeReport::default());
    }

    let table = geocoder.geocode(&places).map_err(|err| {
        error!(
            "event=geocode_merge module=geocode status=error distinct_places={} duration_ms={} error={}",
            places.len(),
            started_at.elapsed().as_millis(),
            err
        );
        err
    })?;

    let report = GeocodeReport {
        distinct_places: places.len(),
        resolved_places: places
            .iter()
            .filter(|place| table.contains_key(place.as_str()))
            .count(),
        events_updated: attach_coordinates(graph, &table),
    };
    info!(
        "event=geocode_merge module=geocode status=ok distinct_places={} resolved={} events_updated={} duration_ms={}",
        report.distinct_places,
        report.resolved_places,
        report.events_updated,
        started_at.elapsed().as_millis()
    );
    Ok(report)
}
