//! Read stored geometry values back as Well-Known Text.
//!
//! The server does the conversion: the stored bytes are inlined into a `SELECT` as a hex literal
//! and passed to the dialect's text conversion function.

use tracing::{debug, warn};

use crate::database::{DatabaseInterface, FieldValue};
use crate::dialect::DialectProfile;

/// The text form of a stored geometry, with its SRID when one was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WktPayload {
    /// The WKT text. Empty when the server could not convert the value.
    pub text: String,

    /// The SRID as returned by the server.
    pub srid: Option<String>,
}

impl WktPayload {
    /// Render as the argument list of a geometry constructor: `'<wkt>',<srid>`.
    ///
    /// The text is quoted but the SRID is spliced in bare, and a missing SRID leaves the
    /// argument empty. The SRID is not checked to be numeric.
    pub fn to_constructor_arguments(&self) -> String {
        format!("'{}',{}", self.text, self.srid.as_deref().unwrap_or_default())
    }

    /// Build a payload from the first row of [`well_known_text_query`].
    pub(crate) fn from_row(row: Option<&[Option<FieldValue>]>, include_srid: bool) -> Self {
        let column = |i: usize| {
            row.and_then(|row| row.get(i))
                .and_then(|value| value.as_ref())
                .map(|value| value.to_string())
        };

        Self {
            text: column(0).unwrap_or_default(),
            srid: if include_srid { column(1) } else { None },
        }
    }

    pub(crate) fn render(self, include_srid: bool) -> String {
        if include_srid {
            self.to_constructor_arguments()
        } else {
            self.text
        }
    }
}

/// The `SELECT` statement that converts `data` to WKT (and its SRID) on the server.
///
/// ```
/// use gis_dialect::{well_known_text_query, DialectProfile};
///
/// let sql = well_known_text_query(&[0x01, 0xff], &DialectProfile::for_version(50700), true);
/// assert_eq!(sql, "SELECT ST_ASTEXT(x'01ff'), ST_SRID(x'01ff')");
/// ```
pub fn well_known_text_query(data: &[u8], profile: &DialectProfile, include_srid: bool) -> String {
    let hex = hex::encode(data);
    let axis_order = if profile.supports_axis_order_directive {
        ", 'axis-order=long-lat'"
    } else {
        ""
    };

    let mut sql = format!("SELECT {}(x'{hex}'{axis_order})", profile.text_fn);
    if include_srid {
        sql.push_str(&format!(", {}(x'{hex}')", profile.srid_fn));
    }
    sql
}

/// Convert a stored geometry value to WKT, returning it with its SRID.
///
/// A failed query yields an empty payload.
pub fn fetch_well_known_text(
    db: &impl DatabaseInterface,
    data: &[u8],
    include_srid: bool,
) -> WktPayload {
    let sql = well_known_text_query(data, &db.profile(), include_srid);
    debug!(sql = %sql, "converting geometry to WKT");

    let row = db.try_query(&sql);
    if row.is_none() {
        warn!(sql = %sql, "geometry to WKT conversion returned no result");
    }
    WktPayload::from_row(row.as_deref(), include_srid)
}

/// Convert a stored geometry value to WKT.
///
/// With `include_srid`, the result is `'<wkt>',<srid>`, ready to be spliced into a
/// `GeomFromText` call. An empty string (or `'',` with `include_srid`) means the value could not
/// be converted; it is not the WKT of an empty geometry.
pub fn convert_to_well_known_text(
    db: &impl DatabaseInterface,
    data: &[u8],
    include_srid: bool,
) -> String {
    fetch_well_known_text(db, data, include_srid).render(include_srid)
}
