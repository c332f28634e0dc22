use std::sync::LazyLock;

use regex::Regex;

use crate::dialect::DialectProfile;

/// WKT keywords accepted as a constructor argument.
const WKT_TYPES: &str =
    "POINT|MULTIPOINT|LINESTRING|MULTILINESTRING|POLYGON|MULTIPOLYGON|GEOMETRYCOLLECTION";

/// A quoted WKT literal followed by an SRID argument, e.g. `'POINT(1 2)',4326`.
static QUOTED_WITH_SRID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^'(?i:{WKT_TYPES})\(.*\)',[0-9]*$")).expect("valid regex")
});

/// A bare WKT literal, e.g. `POINT(1 2)`.
static BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^(?i:{WKT_TYPES})\(.*\)$")).expect("valid regex"));

/// Wrap a user-entered WKT value in the server's geometry constructor.
///
/// Two shapes are recognised: a quoted literal with an SRID argument (`'POINT(1 2)',4326`),
/// which is wrapped as-is, and a bare literal (`POINT(1 2)`), which is quoted first. Anything
/// else, such as an expression that is already wrapped, is returned trimmed but otherwise
/// unchanged. The WKT itself is not validated.
///
/// ```
/// use gis_dialect::create_data;
///
/// assert_eq!(create_data(" POINT(1 2) ", 80032), "ST_GeomFromText('POINT(1 2)')");
/// assert_eq!(create_data("'POINT(1 2)',4326", 50500), "GeomFromText('POINT(1 2)',4326)");
/// assert_eq!(create_data("NULL", 80032), "NULL");
/// ```
pub fn create_data(gis_string: &str, mysql_version: u32) -> String {
    create_data_with_profile(gis_string, &DialectProfile::for_version(mysql_version))
}

/// [`create_data`] with an already-resolved dialect.
pub fn create_data_with_profile(gis_string: &str, profile: &DialectProfile) -> String {
    let gis_string = gis_string.trim();
    let constructor = profile.constructor_fn;

    if QUOTED_WITH_SRID.is_match(gis_string) {
        format!("{constructor}({gis_string})")
    } else if BARE.is_match(gis_string) {
        format!("{constructor}('{gis_string}')")
    } else {
        gis_string.to_string()
    }
}
