//! Conversion options.

use super::{ConvertError, ConvertResult};
use crate::graph::reference::PlacePolicy;
use crate::graph::summary::default_summary_event_types;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options fixed for one conversion run.
///
/// Missing keys in a config file fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Summary mode: primary names only, significant events only.
    pub summary: bool,
    pub place_policy: PlacePolicy,
    /// Event types kept in summary mode.
    pub summary_event_types: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            summary: false,
            place_policy: PlacePolicy::FirstPlace,
            summary_event_types: default_summary_event_types(),
        }
    }
}

impl ConvertOptions {
    /// Defaults for map output: summary mode, first geocoded place.
    pub fn map_defaults() -> Self {
        Self {
            summary: true,
            place_policy: PlacePolicy::FirstGeocoded,
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_place_policy(mut self, policy: PlacePolicy) -> Self {
        self.place_policy = policy;
        self
    }

    /// Loads options from a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| ConvertError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|err| ConvertError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}
