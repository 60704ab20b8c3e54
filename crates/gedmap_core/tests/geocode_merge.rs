use gedmap_core::db::open_cache_db_in_memory;
use gedmap_core::{
    merge_geocodes, GeoCoordinate, GeocodeError, GeocodeResult, GeocodeTable, Geocoder,
    GraphBuilder, SourceEvent, SourceFamily, SourceGraph, SourceIndividual, SqliteGeocodeCache,
    StaticGeocoder,
};
use std::cell::RefCell;
use std::collections::BTreeSet;

/// Records every batch it receives and answers from an inner table.
struct RecordingGeocoder {
    inner: StaticGeocoder,
    calls: RefCell<Vec<BTreeSet<String>>>,
}

impl RecordingGeocoder {
    fn new(inner: StaticGeocoder) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<BTreeSet<String>> {
        self.calls.borrow().clone()
    }
}

impl Geocoder for RecordingGeocoder {
    fn geocode(&self, places: &BTreeSet<String>) -> GeocodeResult<GeocodeTable> {
        self.calls.borrow_mut().push(places.clone());
        self.inner.geocode(places)
    }
}

struct FailingGeocoder;

impl Geocoder for FailingGeocoder {
    fn geocode(&self, _places: &BTreeSet<String>) -> GeocodeResult<GeocodeTable> {
        Err(GeocodeError::Backend("quota exceeded".to_string()))
    }
}

fn springfield() -> GeoCoordinate {
    GeoCoordinate::new(-89.65, 39.78)
}

fn boston() -> GeoCoordinate {
    GeoCoordinate::new(-71.06, 42.36)
}

fn known_places() -> StaticGeocoder {
    StaticGeocoder::new()
        .with_place("Springfield", springfield())
        .with_place("Boston", boston())
}

fn married_couple() -> SourceGraph {
    SourceGraph {
        individuals: vec![
            SourceIndividual::new("@H1@")
                .with_event(SourceEvent::new("BIRT").with_place("Springfield"))
                .with_event(SourceEvent::new("RESI").with_place("Atlantis")),
            SourceIndividual::new("@W1@")
                .with_event(SourceEvent::new("BIRT").with_place("Springfield")),
        ],
        families: vec![SourceFamily::new()
            .with_husband("@H1@")
            .with_wife("@W1@")
            .with_event(SourceEvent::new("MARR").with_place("Boston"))],
    }
}

#[test]
fn each_distinct_place_is_requested_once_in_one_batch() {
    let mut graph = GraphBuilder::new(false).build(&married_couple());
    let geocoder = RecordingGeocoder::new(known_places());

    let report = merge_geocodes(&mut graph, &geocoder).unwrap();

    let calls = geocoder.calls();
    assert_eq!(calls.len(), 1);
    let expected: BTreeSet<String> = ["Atlantis", "Boston", "Springfield"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(calls[0], expected);

    assert_eq!(report.distinct_places, 3);
    assert_eq!(report.resolved_places, 2);
    assert_eq!(report.events_updated, 4);
}

#[test]
fn shared_family_place_is_geocoded_on_both_spouses() {
    let mut graph = GraphBuilder::new(false).build(&married_couple());
    merge_geocodes(&mut graph, &known_places()).unwrap();

    for id in ["@H1@", "@W1@"] {
        let marriage = graph
            .get(id)
            .unwrap()
            .events
            .iter()
            .find(|event| event.kind == "MARR")
            .unwrap();
        assert_eq!(marriage.place.as_ref().unwrap().geo, Some(boston()));
    }
}

#[test]
fn unresolved_places_keep_raw_text_without_coordinate() {
    let mut graph = GraphBuilder::new(false).build(&married_couple());
    merge_geocodes(&mut graph, &known_places()).unwrap();

    let residence = &graph.get("@H1@").unwrap().events[1];
    let place = residence.place.as_ref().unwrap();
    assert_eq!(place.raw, "Atlantis");
    assert!(!place.is_geocoded());
}

#[test]
fn backend_failure_leaves_graph_untouched() {
    let mut graph = GraphBuilder::new(false).build(&married_couple());
    let before = graph.clone();

    let err = merge_geocodes(&mut graph, &FailingGeocoder).unwrap_err();
    assert!(matches!(err, GeocodeError::Backend(_)));
    assert_eq!(graph, before);
}

#[test]
fn graph_without_places_skips_backend() {
    let source = SourceGraph {
        individuals: vec![SourceIndividual::new("@I1@").with_event(SourceEvent::new("BIRT"))],
        families: vec![],
    };
    let mut graph = GraphBuilder::new(false).build(&source);
    let geocoder = RecordingGeocoder::new(known_places());

    let report = merge_geocodes(&mut graph, &geocoder).unwrap();
    assert!(geocoder.calls().is_empty());
    assert_eq!(report.distinct_places, 0);
}

#[test]
fn sqlite_cache_forwards_only_misses() {
    let conn = open_cache_db_in_memory().unwrap();
    let cache = SqliteGeocodeCache::new(&conn, RecordingGeocoder::new(known_places()));

    let mut first = GraphBuilder::new(false).build(&married_couple());
    merge_geocodes(&mut first, &cache).unwrap();
    assert_eq!(cache.cached_len().unwrap(), 2);

    let mut second = GraphBuilder::new(false).build(&married_couple());
    merge_geocodes(&mut second, &cache).unwrap();

    let calls = cache.inner().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].len(), 3);
    // Only the unresolvable place is retried.
    let retried: BTreeSet<String> = ["Atlantis".to_string()].into_iter().collect();
    assert_eq!(calls[1], retried);
    assert_eq!(first, second);
}

#[test]
fn sqlite_cache_answers_without_backend_when_fully_cached() {
    let conn = open_cache_db_in_memory().unwrap();
    let cache = SqliteGeocodeCache::new(&conn, RecordingGeocoder::new(known_places()));
    let places: BTreeSet<String> = ["Boston", "Springfield"]
        .into_iter()
        .map(String::from)
        .collect();

    let warm = cache.geocode(&places).unwrap();
    let cached = cache.geocode(&places).unwrap();

    assert_eq!(warm, cached);
    assert_eq!(cached.get("Springfield"), Some(&springfield()));
    assert_eq!(cache.inner().calls().len(), 1);
}

#[test]
fn static_geocoder_loads_place_table_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("places.json");
    std::fs::write(&path, r#"{ "Springfield": [-89.65, 39.78] }"#).unwrap();

    let geocoder = StaticGeocoder::from_json_file(&path).unwrap();
    assert_eq!(geocoder.len(), 1);

    std::fs::write(&path, r#"{ "Springfield": "somewhere" }"#).unwrap();
    let err = StaticGeocoder::from_json_file(&path).unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidTable { .. }));
}
