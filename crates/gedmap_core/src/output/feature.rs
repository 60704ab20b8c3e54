//! GeoJSON feature assembly.

use crate::model::event::GeoCoordinate;
use crate::model::person::{PersonId, PersonRecord};
use serde::Serialize;

/// GeoJSON geometry. Only points are produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: GeoCoordinate },
}

impl Geometry {
    pub fn point(coordinate: GeoCoordinate) -> Self {
        Self::Point {
            coordinates: coordinate,
        }
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        match self {
            Self::Point { coordinates } => *coordinates,
        }
    }
}

/// One person rendered as a feature. Serialized with `"type": "Feature"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub id: PersonId,
    /// Serialized as `null` when absent, never omitted.
    pub geometry: Option<Geometry>,
    pub properties: PersonRecord,
}

impl Feature {
    /// Geometry comes from the reference place coordinate, when present.
    pub fn from_person(person: PersonRecord) -> Self {
        let geometry = person
            .reference_place
            .as_ref()
            .and_then(|place| place.geo)
            .map(Geometry::point);
        Self {
            id: person.id.clone(),
            geometry,
            properties: person,
        }
    }
}

/// Serialized with `"type": "FeatureCollection"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// One feature per person, in collection order.
pub fn assemble_features(persons: Vec<PersonRecord>) -> FeatureCollection {
    FeatureCollection {
        features: persons.into_iter().map(Feature::from_person).collect(),
    }
}
