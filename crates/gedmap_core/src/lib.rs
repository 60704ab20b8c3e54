//! Ancestor graph normalization and GeoJSON rendering for parsed GEDCOM data.
//! This crate holds every pipeline stage; the CLI only wires arguments.

pub mod db;
pub mod geocode;
pub mod graph;
pub mod logging;
pub mod model;
pub mod output;
pub mod service;
pub mod source;

pub use geocode::{
    merge_geocodes, GeocodeError, GeocodeReport, GeocodeResult, GeocodeTable, Geocoder,
    SqliteGeocodeCache, StaticGeocoder,
};
pub use graph::builder::{BuildReport, GraphBuilder};
pub use graph::date::normalize_date;
pub use graph::reference::{PlacePolicy, PlaceSelector, ReferenceSelector};
pub use graph::AncestorGraph;
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::event::{DateTriple, EventDate, EventRecord, GeoCoordinate, PlaceRecord};
pub use model::person::{Gender, PersonId, PersonRecord, Relations};
pub use output::{assemble_features, Feature, FeatureCollection, Geometry};
pub use service::{AncestorConverter, ConvertError, ConvertOptions, ConvertResult, OutputMode};
pub use source::{
    load_source_graph, SourceError, SourceEvent, SourceFamily, SourceGraph, SourceIndividual,
    SourceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
