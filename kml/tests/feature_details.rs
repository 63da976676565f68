use serde_json::{json, Value};

use geom::{CoordError, Distance};
use kml::{
    feature_details, kind_counts, Error, FeatureDetail, GeometryCollection, GeometryKind,
    LengthRounding, Options,
};

fn load(doc: Value) -> GeometryCollection {
    GeometryCollection::from_json_value(doc, &Options::default()).unwrap()
}

fn details(collection: &GeometryCollection, opts: &Options) -> (Vec<FeatureDetail>, Vec<Error>) {
    feature_details(collection, opts).into_parts()
}

// Three points along the equator, about 1km apart
fn two_km_path() -> Value {
    json!([[0.0, 0.0], [0.0089932, 0.0], [0.0179864, 0.0]])
}

// Two points about 4m apart
fn four_meter_hop(lat: f64) -> Value {
    json!([[0.0, lat], [0.0000359728, lat]])
}

#[test]
fn only_top_level_features_are_listed() {
    let collection = load(json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                "properties": {
                    "name": "Camp",
                    "folders": [{"features": [{
                        "type": "Feature",
                        "geometry": {"type": "LineString", "coordinates": two_km_path()},
                        "properties": {"name": "hidden"}
                    }]}]
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": two_km_path()},
                "properties": {"name": "Approach"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]]},
                "properties": {}
            }
        ]
    }));

    let (rows, warnings) = details(&collection, &Options::default());
    assert!(warnings.is_empty());
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].name, "Camp");
    assert_eq!(rows[0].geometry_kind, Some(GeometryKind::Point));
    assert_eq!(rows[0].length, None);

    assert_eq!(rows[1].name, "Approach");
    assert_eq!(rows[1].geometry_kind, Some(GeometryKind::LineString));
    let length = rows[1].length.unwrap();
    assert!((length.to_kilometers() - 2.0).abs() < 0.01, "got {}", length);
    assert_eq!(length.round_km(), 2.0);

    assert_eq!(rows[2].name, "Feature 3");
    assert_eq!(rows[2].geometry_kind, Some(GeometryKind::Polygon));
    assert_eq!(rows[2].length, None);
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn degenerate_lines_have_zero_length() {
    let collection = load(json!({
        "features": [
            {"geometry": {"type": "LineString", "coordinates": []}},
            {"geometry": {"type": "LineString", "coordinates": [[5.0, 5.0]]}}
        ]
    }));
    let (rows, _) = details(&collection, &Options::default());
    assert_eq!(rows[0].length, Some(Distance::ZERO));
    assert_eq!(rows[1].length, Some(Distance::ZERO));
}

#[test]
fn multi_line_string_sums_its_parts() {
    let collection = load(json!({
        "features": [
            {"geometry": {"type": "MultiLineString", "coordinates": [two_km_path(), [[0.0, 0.0], [0.0, 1.0]]]}},
            {"geometry": {"type": "LineString", "coordinates": two_km_path()}},
            {"geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 1.0]]}}
        ]
    }));
    let (rows, _) = details(&collection, &Options::default());
    let multi = rows[0].length.unwrap();
    let parts = rows[1].length.unwrap() + rows[2].length.unwrap();
    assert!((multi.to_kilometers() - parts.to_kilometers()).abs() < 1e-9);
    assert_eq!(multi.round_km(), 113.19);
}

#[test]
fn rounding_each_part_is_opt_in() {
    let collection = load(json!({
        "features": [{
            "geometry": {
                "type": "MultiLineString",
                "coordinates": [four_meter_hop(0.0), four_meter_hop(0.0), four_meter_hop(0.0)]
            }
        }]
    }));

    let (rows, _) = details(&collection, &Options::default());
    assert_eq!(rows[0].length.unwrap().round_km(), 0.01);

    let legacy = Options {
        length_rounding: LengthRounding::RoundEachPart,
        ..Default::default()
    };
    let (rows, _) = details(&collection, &legacy);
    assert_eq!(rows[0].length.unwrap().round_km(), 0.0);
}

#[test]
fn bad_coordinates_only_lose_that_length() {
    let collection = load(json!({
        "features": [
            {"geometry": {"type": "LineString", "coordinates": two_km_path()}},
            {"geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [10.0, 95.0]]}},
            {"geometry": {"type": "MultiLineString", "coordinates": [two_km_path(), [[200.0, 0.0], [0.0, 0.0]]]}}
        ]
    }));

    let (rows, warnings) = details(&collection, &Options::default());
    assert_eq!(rows.len(), 3);
    assert!(rows[0].length.is_some());
    assert_eq!(rows[1].length, None);
    assert_eq!(rows[1].geometry_kind, Some(GeometryKind::LineString));
    assert_eq!(rows[2].length, None);
    assert_eq!(
        warnings,
        vec![
            Error::InvalidCoordinate {
                feature: 1,
                error: CoordError::InvalidLatitude(95.0),
            },
            Error::InvalidCoordinate {
                feature: 2,
                error: CoordError::InvalidLongitude(200.0),
            },
        ]
    );
    assert_eq!(
        warnings[0].to_string(),
        "Feature 2 has an invalid coordinate: latitude 95 is outside [-90, 90]"
    );
}

#[test]
fn details_are_idempotent_and_serialize_for_display() {
    let collection = load(json!({
        "features": [
            {"geometry": {"type": "LineString", "coordinates": two_km_path()}, "properties": {"name": "Loop"}},
            {"geometry": null, "properties": {"name": "Just a note"}}
        ]
    }));
    let (first, _) = details(&collection, &Options::default());
    let (second, _) = details(&collection, &Options::default());
    assert_eq!(first, second);

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        json!([
            {"id": 0, "name": "Loop", "geometryKind": "LineString", "length": 2.0},
            {"id": 1, "name": "Just a note", "length": null}
        ])
    );

    let tally = kind_counts(&first);
    assert_eq!(tally.get(&GeometryKind::LineString), 1);
    assert_eq!(tally.len(), 1);
}

#[test]
fn document_without_features_has_no_rows() {
    let collection = load(json!({
        "type": "Feature",
        "geometry": {"type": "LineString", "coordinates": two_km_path()}
    }));
    let (rows, warnings) = details(&collection, &Options::default());
    assert!(rows.is_empty());
    assert!(warnings.is_empty());
}
