//! Ancestor conversion service.
//!
//! # Responsibility
//! - Run every pipeline stage in order for one source graph.
//! - Expose the raw-record and feature-collection output modes.
//!
//! # Invariants
//! - Source acquisition is the only fatal step; it happens in the constructor.
//! - A geocoding failure degrades to an ungeocoded graph.
//! - Geocoding runs before reference selection.

use super::options::ConvertOptions;
use super::{ConvertError, ConvertResult};
use crate::geocode::{merge_geocodes, Geocoder};
use crate::graph::builder::GraphBuilder;
use crate::graph::ordering::{sort_person_events, sort_persons};
use crate::graph::reference::ReferenceSelector;
use crate::graph::summary::apply_summary_filter;
use crate::graph::AncestorGraph;
use crate::model::person::{PersonId, PersonRecord};
use crate::output::{assemble_features, FeatureCollection};
use crate::source::{load_source_graph, SourceGraph};
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// Which view of the person collection to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain person records.
    Records,
    /// GeoJSON feature collection.
    Features,
}

/// One-shot converter over a fully loaded source graph.
#[derive(Debug, Clone)]
pub struct AncestorConverter {
    source: SourceGraph,
    options: ConvertOptions,
}

impl AncestorConverter {
    pub fn new(source: SourceGraph, options: ConvertOptions) -> Self {
        Self { source, options }
    }

    /// Loads the source snapshot first; fails before any stage runs.
    pub fn from_file(path: impl AsRef<Path>, options: ConvertOptions) -> ConvertResult<Self> {
        let source = load_source_graph(path)?;
        Ok(Self::new(source, options))
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn source(&self) -> &SourceGraph {
        &self.source
    }

    /// Runs all stages and returns the normalized graph.
    ///
    /// Stage order: build, normalize dates, sort events, geocode, select
    /// references, sort persons, summary filter.
    pub fn build_graph(&self, geocoder: Option<&dyn Geocoder>) -> AncestorGraph {
        let started_at = Instant::now();
        let options = &self.options;

        let mut graph = GraphBuilder::new(options.summary).build(&self.source);
        let parsed_dates = graph.normalize_dates();
        sort_person_events(&mut graph);

        match geocoder {
            Some(geocoder) => {
                if let Err(err) = merge_geocodes(&mut graph, geocoder) {
                    warn!(
                        "event=convert module=service status=degraded stage=geocode error={}",
                        err
                    );
                }
            }
            None if options.place_policy.needs_coordinates() => warn!(
                "event=convert module=service status=degraded reason=no_geocoder policy={}",
                options.place_policy.name()
            ),
            None => {}
        }

        let placed = ReferenceSelector::new(&options.place_policy).apply_all(&mut graph);
        sort_persons(&mut graph);

        if options.summary {
            apply_summary_filter(&mut graph, &options.summary_event_types);
        }

        info!(
            "event=convert module=service status=ok persons={} parsed_dates={} placed={} policy={} summary={} duration_ms={}",
            graph.len(),
            parsed_dates,
            placed,
            options.place_policy.name(),
            options.summary,
            started_at.elapsed().as_millis()
        );
        graph
    }

    /// Raw record mode.
    pub fn records(&self, geocoder: Option<&dyn Geocoder>) -> Vec<PersonRecord> {
        self.build_graph(geocoder).into_persons()
    }

    /// Raw records keyed by person id.
    pub fn record_map(&self, geocoder: Option<&dyn Geocoder>) -> BTreeMap<PersonId, PersonRecord> {
        self.records(geocoder)
            .into_iter()
            .map(|person| (person.id.clone(), person))
            .collect()
    }

    /// Geography-aware mode.
    pub fn feature_collection(&self, geocoder: Option<&dyn Geocoder>) -> FeatureCollection {
        assemble_features(self.records(geocoder))
    }

    /// Renders either mode as a JSON string.
    pub fn to_json(
        &self,
        mode: OutputMode,
        geocoder: Option<&dyn Geocoder>,
    ) -> ConvertResult<String> {
        let rendered = match mode {
            OutputMode::Records => serde_json::to_string(&self.records(geocoder)),
            OutputMode::Features => serde_json::to_string(&self.feature_collection(geocoder)),
        };
        rendered.map_err(ConvertError::Serialize)
    }
}
