use gedmap_core::{
    AncestorConverter, ConvertOptions, DateTriple, GeoCoordinate, Geocoder, OutputMode,
    PlacePolicy, SourceEvent, SourceFamily, SourceGraph, SourceIndividual, StaticGeocoder,
};
use serde_json::{json, Value};

fn single_person_source() -> SourceGraph {
    SourceGraph {
        individuals: vec![SourceIndividual::new("P1")
            .with_name("Pat /One/")
            .with_event(SourceEvent::new("MARR"))
            .with_event(
                SourceEvent::new("BIRT")
                    .with_date("1850")
                    .with_place("Springfield"),
            )],
        families: vec![],
    }
}

fn springfield_table() -> StaticGeocoder {
    StaticGeocoder::new().with_place("Springfield", GeoCoordinate::new(-89.65, 39.78))
}

#[test]
fn single_person_gets_reference_date_place_and_point_geometry() {
    let geocoder = springfield_table();
    let converter = AncestorConverter::new(
        single_person_source(),
        ConvertOptions::default().with_place_policy(PlacePolicy::FirstGeocoded),
    );

    let records = converter.records(Some(&geocoder as &dyn Geocoder));
    let person = &records[0];
    let kinds: Vec<&str> = person.events.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(kinds, vec!["MARR", "BIRT"]);
    assert_eq!(person.reference_date, Some(DateTriple::from_year(1850)));

    let place = person.reference_place.as_ref().unwrap();
    assert_eq!(place.raw, "Springfield");
    assert_eq!(place.geo, Some(GeoCoordinate::new(-89.65, 39.78)));

    let collection = converter.feature_collection(Some(&geocoder as &dyn Geocoder));
    let rendered = serde_json::to_value(&collection).unwrap();
    assert_eq!(rendered["type"], "FeatureCollection");
    assert_eq!(rendered["features"][0]["type"], "Feature");
    assert_eq!(rendered["features"][0]["id"], "P1");
    assert_eq!(
        rendered["features"][0]["geometry"],
        json!({ "type": "Point", "coordinates": [-89.65, 39.78] })
    );
    assert_eq!(
        rendered["features"][0]["properties"]["referenceDate"],
        json!({ "year": 1850 })
    );
}

#[test]
fn ungeocoded_run_renders_null_geometry() {
    let converter = AncestorConverter::new(single_person_source(), ConvertOptions::map_defaults());

    let rendered: Value =
        serde_json::from_str(&converter.to_json(OutputMode::Features, None).unwrap()).unwrap();
    let feature = &rendered["features"][0];
    assert!(feature["geometry"].is_null());
    assert!(feature["properties"].get("referencePlace").is_none());
}

#[test]
fn first_place_policy_works_without_geocoder() {
    let converter = AncestorConverter::new(single_person_source(), ConvertOptions::default());

    let records = converter.records(None);
    let place = records[0].reference_place.as_ref().unwrap();
    assert_eq!(place.raw, "Springfield");
    assert!(place.geo.is_none());
}

#[test]
fn couple_marriage_is_geocoded_once_for_both_spouses() {
    let source = SourceGraph {
        individuals: vec![SourceIndividual::new("H1"), SourceIndividual::new("W1")],
        families: vec![SourceFamily::new()
            .with_husband("H1")
            .with_wife("W1")
            .with_event(SourceEvent::new("MARR").with_place("Boston"))],
    };
    let geocoder = StaticGeocoder::new().with_place("Boston", GeoCoordinate::new(-71.06, 42.36));
    let converter = AncestorConverter::new(source, ConvertOptions::map_defaults());

    let collection = converter.feature_collection(Some(&geocoder as &dyn Geocoder));
    assert_eq!(collection.len(), 2);
    for feature in &collection.features {
        let geometry = feature.geometry.as_ref().unwrap();
        assert_eq!(geometry.coordinate(), GeoCoordinate::new(-71.06, 42.36));
    }
}

#[test]
fn summary_output_keeps_significant_events_only() {
    let source = SourceGraph {
        individuals: vec![
            SourceIndividual::new("@I1@")
                .with_name("Ada /Lovelace/")
                .with_name("Augusta Ada /Byron/")
                .with_event(SourceEvent::new("BIRT").with_date("10 DEC 1815"))
                .with_event(SourceEvent::new("RESI").with_place("London"))
                .with_event(SourceEvent::new("DEAT").with_date("27 NOV 1852")),
            SourceIndividual::new("@I2@").with_event(SourceEvent::new("CENS")),
        ],
        families: vec![],
    };
    let converter =
        AncestorConverter::new(source, ConvertOptions::default().with_summary(true));

    let records = converter.record_map(None);
    let ada = &records["@I1@"];
    let kinds: Vec<&str> = ada.events.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(kinds, vec!["BIRT", "DEAT"]);
    assert_eq!(ada.name.as_deref(), Some("Ada /Lovelace/"));
    assert!(ada.names.is_empty());
    assert_eq!(ada.reference_date, Some(DateTriple::from_ymd(1815, 11, 10)));
    // Reference place was chosen before filtering.
    assert_eq!(ada.reference_place.as_ref().unwrap().raw, "London");

    let rendered = serde_json::to_value(&records["@I2@"]).unwrap();
    assert!(rendered.get("events").is_none());
}

#[test]
fn records_are_ordered_by_reference_date_with_undated_first() {
    let source = SourceGraph {
        individuals: vec![
            SourceIndividual::new("@LATE@")
                .with_event(SourceEvent::new("BIRT").with_date("1900")),
            SourceIndividual::new("@NONE@"),
            SourceIndividual::new("@EARLY@")
                .with_event(SourceEvent::new("BIRT").with_date("MAR 1850")),
        ],
        families: vec![],
    };
    let converter = AncestorConverter::new(source, ConvertOptions::default());

    let ids: Vec<String> = converter
        .records(None)
        .into_iter()
        .map(|person| person.id)
        .collect();
    assert_eq!(ids, vec!["@NONE@", "@EARLY@", "@LATE@"]);
}

#[test]
fn raw_record_json_uses_camel_case_and_keeps_raw_dates() {
    let converter = AncestorConverter::new(single_person_source(), ConvertOptions::default());

    let rendered: Value =
        serde_json::from_str(&converter.to_json(OutputMode::Records, None).unwrap()).unwrap();
    let person = &rendered[0];
    assert_eq!(person["id"], "P1");
    assert_eq!(person["gender"], "U");
    assert_eq!(person["referenceDate"], json!({ "year": 1850 }));
    assert_eq!(person["referencePlace"], json!({ "raw": "Springfield" }));
    assert_eq!(
        person["events"][1],
        json!({
            "type": "BIRT",
            "date": { "raw": "1850", "parsed": { "year": 1850 } },
            "place": { "raw": "Springfield" }
        })
    );
}
