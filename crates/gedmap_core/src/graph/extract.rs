//! Source event extraction.

use crate::model::event::{EventDate, EventRecord, PlaceRecord};
use crate::source::SourceEvent;

/// Converts one source event into an `EventRecord`.
///
/// Stores raw date and place text only. Date parsing happens in the bulk
/// normalization pass and geocoding in the merger.
pub fn extract_event(source: &SourceEvent) -> EventRecord {
    let mut event = EventRecord::new(source.kind.trim());
    event.date = non_blank(source.date.as_deref()).map(EventDate::new);
    event.place = non_blank(source.place.as_deref()).map(PlaceRecord::new);
    event
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::extract_event;
    use crate::source::SourceEvent;

    #[test]
    fn keeps_raw_date_without_parsing() {
        let event = extract_event(&SourceEvent::new("BIRT").with_date("12 JAN 1850"));

        let date = event.date.expect("date should be kept");
        assert_eq!(date.raw, "12 JAN 1850");
        assert_eq!(date.parsed, None);
        assert!(event.place.is_none());
    }

    #[test]
    fn keeps_raw_place_without_coordinates() {
        let event = extract_event(&SourceEvent::new("DEAT").with_place("Springfield"));

        let place = event.place.expect("place should be kept");
        assert_eq!(place.raw, "Springfield");
        assert!(!place.is_geocoded());
        assert!(event.date.is_none());
    }

    #[test]
    fn blank_date_and_place_are_absent() {
        let event = extract_event(&SourceEvent::new("MARR").with_date("  ").with_place(""));
        assert!(event.date.is_none());
        assert!(event.place.is_none());
    }
}
