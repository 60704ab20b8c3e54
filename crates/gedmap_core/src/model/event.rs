//! Event, date and place records.
//!
//! # Responsibility
//! - Hold one normalized life event with its optional date and place.
//! - Keep the original raw strings alongside any derived values.
//!
//! # Invariants
//! - `EventDate::raw` is always retained, even when parsing failed.
//! - `PlaceRecord::raw` is the merge key for geocoding results.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// GEDCOM code for a birth event.
pub const EVENT_BIRTH: &str = "BIRT";
/// GEDCOM code for a death event.
pub const EVENT_DEATH: &str = "DEAT";
/// GEDCOM code for a marriage event.
pub const EVENT_MARRIAGE: &str = "MARR";
/// GEDCOM code for a divorce event.
pub const EVENT_DIVORCE: &str = "DIV";
/// GEDCOM code for a baptism event.
pub const EVENT_BAPTISM: &str = "BAPM";
/// GEDCOM code for an adoption event.
pub const EVENT_ADOPTION: &str = "ADOP";
/// GEDCOM code for a blessing event.
pub const EVENT_BLESSING: &str = "BLES";

/// Calendar position with independently optional fields.
///
/// `month` is zero-based (`0` = January).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateTriple {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl DateTriple {
    /// Year-only triple, as produced for bare year strings.
    pub fn from_year(year: i32) -> Self {
        Self {
            year: Some(year),
            month: None,
            day: None,
        }
    }

    /// Year and zero-based month, day unknown.
    pub fn from_year_month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: None,
        }
    }

    /// Fully specified triple with a zero-based month.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    /// Returns `None` for an all-absent triple so it is never retained.
    pub fn into_present(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// Date attached to an event: the source text plus its parsed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    /// Source date text, kept verbatim.
    pub raw: String,
    /// Filled by the date normalization pass; absent when unparseable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<DateTriple>,
}

impl EventDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            parsed: None,
        }
    }
}

/// Geographic position, serialized as a GeoJSON `[longitude, latitude]` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoCoordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Returns the coordinate in GeoJSON axis order.
    pub fn to_pair(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl Serialize for GeoCoordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_pair().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GeoCoordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (longitude, latitude) = <(f64, f64)>::deserialize(deserializer)?;
        Ok(Self::new(longitude, latitude))
    }
}

/// Place attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Source place text; the geocoding merge key.
    pub raw: String,
    /// Attached by the geocode merger when the place could be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinate>,
}

impl PlaceRecord {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            geo: None,
        }
    }

    pub fn is_geocoded(&self) -> bool {
        self.geo.is_some()
    }
}

/// One normalized life event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Open-ended event code (`BIRT`, `MARR`, ...). Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<EventDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceRecord>,
    /// Position in the owning person's list at insertion time.
    #[serde(skip)]
    pub(crate) sequence: usize,
}

impl EventRecord {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            date: None,
            place: None,
            sequence: 0,
        }
    }

    /// Parsed date, if the raw date was normalized successfully.
    pub fn date_triple(&self) -> Option<&DateTriple> {
        self.date.as_ref().and_then(|date| date.parsed.as_ref())
    }

    /// Place carrying an attached coordinate, if any.
    pub fn geocoded_place(&self) -> Option<&PlaceRecord> {
        self.place.as_ref().filter(|place| place.is_geocoded())
    }

    /// Source-order position within the owning person.
    pub fn sequence(&self) -> usize {
        self.sequence
    }
}
