//! Output views over the normalized person collection.
//!
//! # Responsibility
//! - Render persons as a GeoJSON `FeatureCollection`.
//!
//! # Invariants
//! - Every feature carries a `geometry` key; `null` when no coordinate exists.

mod feature;

pub use feature::{assemble_features, Feature, FeatureCollection, Geometry};
