use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GisError, Result};

/// The spatial column types a user can pick for a column.
///
/// Variants are declared in display order; [`GeometryType::ALL`] follows the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Geometry,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// Every geometry type, in display order.
    pub const ALL: [GeometryType; 8] = [
        GeometryType::Geometry,
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    /// The lower-case SQL type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Geometry => "geometry",
            GeometryType::Point => "point",
            GeometryType::LineString => "linestring",
            GeometryType::Polygon => "polygon",
            GeometryType::MultiPoint => "multipoint",
            GeometryType::MultiLineString => "multilinestring",
            GeometryType::MultiPolygon => "multipolygon",
            GeometryType::GeometryCollection => "geometrycollection",
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = GisError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        GeometryType::ALL
            .into_iter()
            .find(|geom_type| geom_type.as_str() == normalized)
            .ok_or_else(|| GisError::UnknownGeometryType(s.to_string()))
    }
}

/// Names of the spatial column types, in display order.
///
/// ```
/// let types = gis_dialect::get_data_types(true);
/// assert_eq!(types[0], "GEOMETRY");
/// assert_eq!(types.len(), 8);
/// ```
pub fn get_data_types(upper_case: bool) -> Vec<String> {
    GeometryType::ALL
        .iter()
        .map(|geom_type| {
            if upper_case {
                geom_type.as_str().to_uppercase()
            } else {
                geom_type.as_str().to_string()
            }
        })
        .collect()
}
