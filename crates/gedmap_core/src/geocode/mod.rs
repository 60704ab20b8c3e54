//! Batch geocoding contract, backends and graph merge.
//!
//! # Responsibility
//! - Define the batch-only geocoding collaborator.
//! - Provide an in-memory table backend and an SQLite caching decorator.
//! - Merge lookup results into every event place of an ancestor graph.
//!
//! # Invariants
//! - Backends are called with deduplicated place strings only.
//! - A backend returns entries only for places it could resolve.

mod cache;
mod merge;
mod static_table;

pub use cache::SqliteGeocodeCache;
pub use merge::{attach_coordinates, collect_places, merge_geocodes, GeocodeReport};
pub use static_table::StaticGeocoder;

use crate::db::DbError;
use crate::model::event::GeoCoordinate;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// Raw place string -> coordinate.
pub type GeocodeTable = BTreeMap<String, GeoCoordinate>;

/// Geocoding failure. Recoverable: callers may continue ungeocoded.
#[derive(Debug)]
pub enum GeocodeError {
    /// Backend service failure (network, quota, ...).
    Backend(String),
    /// Cache storage failure.
    Cache(DbError),
    /// Place table file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Place table file is not a `{place: [lon, lat]}` object.
    InvalidTable {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for GeocodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "geocoding backend failed: {message}"),
            Self::Cache(err) => write!(f, "geocode cache failed: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read place table `{}`: {source}", path.display())
            }
            Self::InvalidTable { path, source } => {
                write!(f, "invalid place table `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for GeocodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(_) => None,
            Self::Cache(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::InvalidTable { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for GeocodeError {
    fn from(value: DbError) -> Self {
        Self::Cache(value)
    }
}

impl From<rusqlite::Error> for GeocodeError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Cache(DbError::Sqlite(value))
    }
}

/// Batch geocoding collaborator.
pub trait Geocoder {
    /// Resolves `places` in one call. Unresolvable places are simply missing
    /// from the returned table.
    fn geocode(&self, places: &BTreeSet<String>) -> GeocodeResult<GeocodeTable>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, places: &BTreeSet<String>) -> GeocodeResult<GeocodeTable> {
        (**self).geocode(places)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, places: &BTreeSet<String>) -> GeocodeResult<GeocodeTable> {
        (**self).geocode(places)
    }
}
