//! Server identification and the spatial SQL naming rules that follow from it.
//!
//! MySQL renamed its spatial functions over several releases. A [`DialectProfile`] resolves
//! every version-dependent name once, so callers never compare raw version numbers themselves.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GisError, Result};

/// First version with `ST_AsText`, `ST_SRID` and `ST_GeomFromText`.
const ST_CONVERSION_FUNCTIONS: DialectVersion = DialectVersion::new(5, 6, 0);

/// First version where the spatial relation and accessor functions take the `ST_` prefix.
const ST_FUNCTION_PREFIX: DialectVersion = DialectVersion::new(5, 6, 1);

/// First MySQL version that honours SRID axis order, and so accepts an `axis-order` option.
const AXIS_ORDER_OPTION: DialectVersion = DialectVersion::new(8, 0, 1);

/// The server family behind a connection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    /// Oracle MySQL.
    #[default]
    #[serde(rename = "mysql")]
    MySql,

    /// MariaDB, which reports MySQL-compatible version numbers but kept the legacy axis order.
    #[serde(rename = "mariadb")]
    MariaDb,
}

/// A server version encoded as `MAJOR * 10000 + MINOR * 100 + PATCH`, e.g. `80032` for 8.0.32.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialectVersion(u32);

impl DialectVersion {
    /// Encode a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self(major * 10000 + minor * 100 + patch)
    }

    /// Parse the leading `MAJOR.MINOR.PATCH` of a server version string.
    ///
    /// Anything after the numeric part is ignored, so `5.7.44-log` and
    /// `10.11.6-MariaDB-1:10.11.6+maria~ubu2204` both parse. Missing components count as zero.
    /// Minor and patch must be below 100, and the encoded form must fit in a `u32`.
    pub fn parse(version: &str) -> Result<Self> {
        let mut components = [0u32; 3];
        let mut parts = version.trim().split('.');
        for (i, component) in components.iter_mut().enumerate() {
            let Some(part) = parts.next() else {
                break;
            };
            let digits = part.len() - part.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                if i == 0 {
                    return Err(GisError::InvalidVersion(version.to_string()));
                }
                break;
            }
            *component = part[..digits]
                .parse()
                .map_err(|_| GisError::InvalidVersion(version.to_string()))?;
            if digits != part.len() {
                break;
            }
        }

        let invalid = || GisError::InvalidVersion(version.to_string());
        let [major, minor, patch] = components;
        if minor >= 100 || patch >= 100 {
            return Err(invalid());
        }
        major
            .checked_mul(10000)
            .and_then(|encoded| encoded.checked_add(minor * 100 + patch))
            .map(Self)
            .ok_or_else(invalid)
    }

    /// The encoded integer form.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn major(&self) -> u32 {
        self.0 / 10000
    }

    pub fn minor(&self) -> u32 {
        self.0 / 100 % 100
    }

    pub fn patch(&self) -> u32 {
        self.0 % 100
    }
}

impl From<u32> for DialectVersion {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<DialectVersion> for u32 {
    fn from(value: DialectVersion) -> Self {
        value.0
    }
}

impl FromStr for DialectVersion {
    type Err = GisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for DialectVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())
    }
}

/// Version and vendor of a database server.
///
/// This can be probed from a live connection or pinned in an application's configuration:
///
/// ```
/// use gis_dialect::{DialectVersion, ServerInfo, Vendor};
///
/// let info = ServerInfo::from_version_string("10.11.6-MariaDB").unwrap();
/// assert_eq!(info.vendor, Vendor::MariaDb);
/// assert_eq!(info.version, DialectVersion::new(10, 11, 6));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerInfo {
    pub version: DialectVersion,
    #[serde(default)]
    pub vendor: Vendor,
}

impl ServerInfo {
    /// Describe a server from an already-known version and vendor.
    pub fn new(version: DialectVersion, vendor: Vendor) -> Self {
        Self { version, vendor }
    }

    /// Identify a server from the output of `SELECT VERSION()`.
    pub fn from_version_string(version: &str) -> Result<Self> {
        let vendor = if version.to_ascii_lowercase().contains("mariadb") {
            Vendor::MariaDb
        } else {
            Vendor::MySql
        };
        Ok(Self {
            version: DialectVersion::parse(version)?,
            vendor,
        })
    }

    /// Resolve the spatial SQL names for this server.
    pub fn profile(&self) -> DialectProfile {
        DialectProfile::new(self.version, self.vendor)
    }
}

/// Spatial SQL names valid for one server version and vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialectProfile {
    /// Geometry to WKT conversion, `ST_ASTEXT` or `ASTEXT`.
    pub text_fn: &'static str,

    /// SRID accessor, `ST_SRID` or `SRID`.
    pub srid_fn: &'static str,

    /// WKT to geometry constructor, `ST_GeomFromText` or `GeomFromText`.
    pub constructor_fn: &'static str,

    /// Prefix for relation and type specific accessor functions, `ST_` or empty.
    pub function_prefix: &'static str,

    /// Whether the text conversion accepts an `axis-order=long-lat` option.
    pub supports_axis_order_directive: bool,
}

impl DialectProfile {
    /// Resolve the spatial SQL names for `version` on a `vendor` server.
    pub fn new(version: DialectVersion, vendor: Vendor) -> Self {
        let st_conversion = version >= ST_CONVERSION_FUNCTIONS;
        Self {
            text_fn: if st_conversion { "ST_ASTEXT" } else { "ASTEXT" },
            srid_fn: if st_conversion { "ST_SRID" } else { "SRID" },
            constructor_fn: if st_conversion {
                "ST_GeomFromText"
            } else {
                "GeomFromText"
            },
            function_prefix: if version >= ST_FUNCTION_PREFIX {
                "ST_"
            } else {
                ""
            },
            supports_axis_order_directive: version >= AXIS_ORDER_OPTION
                && vendor == Vendor::MySql,
        }
    }

    /// Profile for callers that only know the integer version.
    ///
    /// The vendor only affects [`Self::supports_axis_order_directive`], which is resolved as for
    /// MySQL.
    pub fn for_version(version: u32) -> Self {
        Self::new(DialectVersion(version), Vendor::MySql)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_versions() {
        assert_eq!(DialectVersion::parse("8.0.32").unwrap().as_u32(), 80032);
        assert_eq!(DialectVersion::parse("5.7.44-log").unwrap().as_u32(), 50744);
        assert_eq!(
            DialectVersion::parse("10.11.6-MariaDB-1:10.11.6+maria~ubu2204")
                .unwrap()
                .as_u32(),
            101106
        );
        assert_eq!(DialectVersion::parse(" 5.6 ").unwrap().as_u32(), 50600);
        assert_eq!(DialectVersion::parse("8").unwrap().as_u32(), 80000);
        assert_eq!(DialectVersion::parse("8.0-beta").unwrap().as_u32(), 80000);
    }

    #[test]
    fn parse_bad_versions() {
        assert!(DialectVersion::parse("").is_err());
        assert!(DialectVersion::parse("MariaDB").is_err());
        assert!(DialectVersion::parse("v8.0.1").is_err());
        assert!(matches!(
            DialectVersion::parse("5.100.0"),
            Err(GisError::InvalidVersion(_))
        ));
        assert!(DialectVersion::parse("8.0.100").is_err());
        assert!(matches!(
            DialectVersion::parse("4294967.0.0"),
            Err(GisError::InvalidVersion(_))
        ));
        assert!(DialectVersion::parse("429496.99.99").is_err());
        assert_eq!(
            DialectVersion::parse("429496.72.95").unwrap().as_u32(),
            u32::MAX
        );
        assert_eq!(
            DialectVersion::parse("x").unwrap_err().to_string(),
            "Invalid server version: x"
        );
    }

    #[test]
    fn display_round_trips_components() {
        let version = DialectVersion::from(80001);
        assert_eq!(version.major(), 8);
        assert_eq!(version.minor(), 0);
        assert_eq!(version.patch(), 1);
        assert_eq!(version.to_string(), "8.0.1");
        assert_eq!("8.0.1".parse::<DialectVersion>().unwrap(), version);
    }

    #[test]
    fn detect_vendor() {
        let mysql = ServerInfo::from_version_string("8.0.36-0ubuntu0.22.04.1").unwrap();
        assert_eq!(mysql, ServerInfo::new(DialectVersion(80036), Vendor::MySql));

        let mariadb = ServerInfo::from_version_string("11.2.2-mariadb").unwrap();
        assert_eq!(mariadb, ServerInfo::new(DialectVersion(110202), Vendor::MariaDb));
    }

    #[test]
    fn conversion_function_threshold() {
        let legacy = DialectProfile::for_version(50599);
        assert_eq!(legacy.text_fn, "ASTEXT");
        assert_eq!(legacy.srid_fn, "SRID");
        assert_eq!(legacy.constructor_fn, "GeomFromText");

        let current = DialectProfile::for_version(50600);
        assert_eq!(current.text_fn, "ST_ASTEXT");
        assert_eq!(current.srid_fn, "ST_SRID");
        assert_eq!(current.constructor_fn, "ST_GeomFromText");
    }

    #[test]
    fn function_prefix_threshold() {
        assert_eq!(DialectProfile::for_version(50600).function_prefix, "");
        assert_eq!(DialectProfile::for_version(50601).function_prefix, "ST_");
    }

    #[test]
    fn axis_order_only_on_mysql_8() {
        let axis_order = |version: u32, vendor: Vendor| {
            DialectProfile::new(DialectVersion(version), vendor).supports_axis_order_directive
        };
        assert!(!axis_order(80000, Vendor::MySql));
        assert!(axis_order(80001, Vendor::MySql));
        assert!(!axis_order(80001, Vendor::MariaDb));
        assert!(!axis_order(101106, Vendor::MariaDb));
    }

    #[test]
    fn server_info_from_config() {
        let info: ServerInfo =
            serde_json::from_str(r#"{"version": 50744, "vendor": "mariadb"}"#).unwrap();
        assert_eq!(info, ServerInfo::new(DialectVersion(50744), Vendor::MariaDb));

        let info: ServerInfo = serde_json::from_str(r#"{"version": 80032}"#).unwrap();
        assert_eq!(info.vendor, Vendor::MySql);
        assert!(info.profile().supports_axis_order_directive);
    }
}
