use serde::{Serialize, Serializer};

use abstutil::{Counter, Warn};
use geom::{round_2dp, try_path_length, CoordError, Distance};

use crate::{Error, GeometryCollection, GeometryKind, LengthRounding, Options};

/// One row per top-level feature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureDetail {
    /// The feature's position in the document, from 0.
    pub id: usize,
    /// `properties.name`, or "Feature N" (counting from 1) when that's missing or empty.
    pub name: String,
    #[serde(rename = "geometryKind", skip_serializing_if = "Option::is_none")]
    pub geometry_kind: Option<GeometryKind>,
    /// Only for LineStrings and MultiLineStrings. Serialized in kilometers, rounded to 2
    /// decimals.
    #[serde(serialize_with = "serialize_km")]
    pub length: Option<Distance>,
}

/// Describes every top-level feature, in document order. Features nested inside folders,
/// placemarks, and so on are deliberately not listed; `summarize` is the place to count those.
///
/// A feature with an unusable coordinate still gets a row, just without a length, and the
/// problem is returned as an `InvalidCoordinate` warning.
pub fn feature_details(
    collection: &GeometryCollection,
    opts: &Options,
) -> Warn<Vec<FeatureDetail>, Error> {
    let mut details = Vec::new();
    let mut warnings = Vec::new();

    for (idx, id) in collection.features().iter().enumerate() {
        let node = collection.node(*id);
        let name = match node.name {
            Some(ref name) if !name.is_empty() => name.clone(),
            _ => format!("Feature {}", idx + 1),
        };

        let length = match node.geometry.as_ref().map(|g| &g.value) {
            Some(geojson::Value::LineString(pts)) => Some(try_path_length(pts)),
            Some(geojson::Value::MultiLineString(lines)) => {
                Some(multi_line_length(lines, opts.length_rounding))
            }
            _ => None,
        };
        let length = match length {
            Some(Ok(length)) => Some(length),
            Some(Err(error)) => {
                warnings.push(Error::InvalidCoordinate {
                    feature: idx,
                    error,
                });
                None
            }
            None => None,
        };

        details.push(FeatureDetail {
            id: idx,
            name,
            geometry_kind: node.geometry_kind(),
            length,
        });
    }

    Warn::warnings(details, warnings)
}

/// Tallies the detail rows by geometry kind. Rows without geometry aren't counted.
pub fn kind_counts(details: &[FeatureDetail]) -> Counter<GeometryKind> {
    details.iter().filter_map(|d| d.geometry_kind).collect()
}

fn multi_line_length(
    lines: &[geojson::LineStringType],
    rounding: LengthRounding,
) -> Result<Distance, CoordError> {
    match rounding {
        LengthRounding::SumThenRound => lines.iter().map(|pts| try_path_length(pts)).sum(),
        LengthRounding::RoundEachPart => {
            let mut km = 0.0;
            for pts in lines {
                km += try_path_length(pts)?.round_km();
            }
            Ok(Distance::kilometers(round_2dp(km)))
        }
    }
}

fn serialize_km<S: Serializer>(length: &Option<Distance>, s: S) -> Result<S::Ok, S::Error> {
    length.map(|d| d.round_km()).serialize(s)
}
