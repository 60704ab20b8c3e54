//! In-memory place table backend.

use super::{GeocodeError, GeocodeResult, GeocodeTable, Geocoder};
use crate::model::event::GeoCoordinate;
use std::collections::BTreeSet;
use std::path::Path;

/// Geocoder answering from a fixed place table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticGeocoder {
    table: GeocodeTable,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: GeocodeTable) -> Self {
        Self { table }
    }

    /// Loads a `{"place": [longitude, latitude], ...}` JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> GeocodeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GeocodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = serde_json::from_str(&text).map_err(|source| GeocodeError::InvalidTable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { table })
    }

    pub fn with_place(mut self, place: impl Into<String>, coordinate: GeoCoordinate) -> Self {
        self.table.insert(place.into(), coordinate);
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, places: &BTreeSet<String>) -> GeocodeResult<GeocodeTable> {
        Ok(places
            .iter()
            .filter_map(|place| {
                self.table
                    .get(place.as_str())
                    .map(|coordinate| (place.clone(), *coordinate))
            })
            .collect())
    }
}
