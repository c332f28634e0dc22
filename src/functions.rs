//! The spatial SQL functions offered for a column, grouped for display.

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::database::DatabaseInterface;
use crate::dialect::DialectProfile;

/// What a spatial function returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    Int,
    Float,
    Text,
    Point,
    LineString,
    Polygon,
}

/// A spatial SQL function and its signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SpatialFunction {
    pub name: String,

    /// Number of geometry arguments, 1 or 2.
    pub params: u8,

    #[serde(rename = "type")]
    pub return_kind: ReturnKind,
}

impl SpatialFunction {
    fn new(name: impl Into<String>, params: u8, return_kind: ReturnKind) -> Self {
        Self {
            name: name.into(),
            params,
            return_kind,
        }
    }
}

/// A visual break between groups of functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// The empty first option of a drop-down.
    Blank,

    /// A horizontal rule between function groups.
    Rule,
}

impl Separator {
    pub fn label(&self) -> &'static str {
        match self {
            Separator::Blank => " ",
            Separator::Rule => "--------",
        }
    }
}

impl Serialize for Separator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Separator", 1)?;
        state.serialize_field("display", self.label())?;
        state.end()
    }
}

/// One item of a [`FunctionCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Function(SpatialFunction),
    Separator(Separator),
}

/// Spatial functions in display order, optionally interleaved with separators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FunctionCatalog(Vec<CatalogEntry>);

impl FunctionCatalog {
    fn separator(&mut self, display: bool, separator: Separator) {
        if display {
            self.0.push(CatalogEntry::Separator(separator));
        }
    }

    fn unary(&mut self, name: impl Into<String>, return_kind: ReturnKind) {
        self.0
            .push(CatalogEntry::Function(SpatialFunction::new(name, 1, return_kind)));
    }

    fn binary(&mut self, name: impl Into<String>) {
        self.0.push(CatalogEntry::Function(SpatialFunction::new(
            name,
            2,
            ReturnKind::Int,
        )));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.0.iter()
    }

    /// The functions, skipping separators.
    pub fn functions(&self) -> impl Iterator<Item = &SpatialFunction> {
        self.0.iter().filter_map(|entry| match entry {
            CatalogEntry::Function(function) => Some(function),
            CatalogEntry::Separator(_) => None,
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions().map(|function| function.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&SpatialFunction> {
        self.functions().find(|function| function.name == name)
    }

    /// The functions keyed by name, in display order.
    pub fn to_index_map(&self) -> IndexMap<&str, &SpatialFunction> {
        self.functions()
            .map(|function| (function.name.as_str(), function))
            .collect()
    }
}

impl IntoIterator for FunctionCatalog {
    type Item = CatalogEntry;
    type IntoIter = std::vec::IntoIter<CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FunctionCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// List the spatial functions that apply to `geom_type`.
///
/// Functions common to every geometry come first, then those specific to `geom_type`, then,
/// with `binary`, the two-geometry relation functions and their bounding-rectangle variants.
/// An unknown or missing `geom_type` only gets the common groups. With `display`, separators
/// are placed between groups for rendering as a drop-down.
///
/// ```
/// use gis_dialect::{get_functions, DialectProfile};
///
/// let catalog = get_functions(Some("point"), false, false, &DialectProfile::for_version(80032));
/// let names: Vec<_> = catalog.names().collect();
/// assert_eq!(
///     names,
///     ["Dimension", "Envelope", "GeometryType", "SRID", "IsEmpty", "IsSimple", "ST_X", "ST_Y"]
/// );
/// ```
pub fn get_functions(
    geom_type: Option<&str>,
    binary: bool,
    display: bool,
    profile: &DialectProfile,
) -> FunctionCatalog {
    let mut funcs = FunctionCatalog::default();
    funcs.separator(display, Separator::Blank);

    funcs.unary("Dimension", ReturnKind::Int);
    funcs.unary("Envelope", ReturnKind::Polygon);
    funcs.unary("GeometryType", ReturnKind::Text);
    funcs.unary("SRID", ReturnKind::Int);
    funcs.unary("IsEmpty", ReturnKind::Int);
    funcs.unary("IsSimple", ReturnKind::Int);

    let geom_type = geom_type.unwrap_or_default().trim().to_lowercase();
    // geometry and multipoint have no type specific functions to separate.
    if geom_type != "geometry" && geom_type != "multipoint" {
        funcs.separator(display, Separator::Rule);
    }

    let prefix = profile.function_prefix;
    match geom_type.as_str() {
        "point" => {
            funcs.unary(format!("{prefix}X"), ReturnKind::Float);
            funcs.unary(format!("{prefix}Y"), ReturnKind::Float);
        }
        "linestring" => {
            funcs.unary("EndPoint", ReturnKind::Point);
            funcs.unary("GLength", ReturnKind::Float);
            funcs.unary("NumPoints", ReturnKind::Int);
            funcs.unary("StartPoint", ReturnKind::Point);
            funcs.unary("IsRing", ReturnKind::Int);
        }
        "multilinestring" => {
            funcs.unary("GLength", ReturnKind::Float);
            funcs.unary("IsClosed", ReturnKind::Int);
        }
        "polygon" => {
            funcs.unary("Area", ReturnKind::Float);
            funcs.unary("ExteriorRing", ReturnKind::LineString);
            funcs.unary("NumInteriorRings", ReturnKind::Int);
        }
        "multipolygon" => {
            funcs.unary("Area", ReturnKind::Float);
            funcs.unary("Centroid", ReturnKind::Point);
        }
        "geometrycollection" => {
            funcs.unary("NumGeometries", ReturnKind::Int);
        }
        _ => {}
    }

    if binary {
        funcs.separator(display, Separator::Rule);

        for name in [
            "Crosses",
            "Contains",
            "Disjoint",
            "Equals",
            "Intersects",
            "Overlaps",
            "Touches",
            "Within",
        ] {
            funcs.binary(format!("{prefix}{name}"));
        }

        funcs.separator(display, Separator::Rule);

        // Minimum bounding rectangle functions never take the prefix.
        for name in [
            "MBRContains",
            "MBRDisjoint",
            "MBREquals",
            "MBRIntersects",
            "MBROverlaps",
            "MBRTouches",
            "MBRWithin",
        ] {
            funcs.binary(name);
        }
    }

    funcs
}

/// [`get_functions`] with the dialect of a live connection.
pub fn get_functions_for(
    db: &impl DatabaseInterface,
    geom_type: Option<&str>,
    binary: bool,
    display: bool,
) -> FunctionCatalog {
    get_functions(geom_type, binary, display, &db.profile())
}
