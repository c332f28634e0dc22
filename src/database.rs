//! The slice of a database connection this crate needs.

use std::fmt::Display;

use crate::dialect::{DialectProfile, DialectVersion, ServerInfo, Vendor};

/// A single non-null column value of a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

/// One result row, with `None` for SQL `NULL`.
pub type Row = Vec<Option<FieldValue>>;

/// A connection that can report its server and run a query.
///
/// Implementations own connection management and timeouts. Failures are reported as `None`
/// rather than as errors, since every caller in this crate treats them as missing data.
pub trait DatabaseInterface {
    /// The server version encoded as `MAJOR * 10000 + MINOR * 100 + PATCH`.
    fn version(&self) -> u32;

    /// Whether the server is MariaDB rather than MySQL.
    fn is_mariadb(&self) -> bool;

    /// Run `sql` and return its first row, or `None` if the query failed or returned nothing.
    fn try_query(&self, sql: &str) -> Option<Row>;

    /// The server version and vendor as a [`ServerInfo`].
    fn server_info(&self) -> ServerInfo {
        let vendor = if self.is_mariadb() {
            Vendor::MariaDb
        } else {
            Vendor::MySql
        };
        ServerInfo::new(DialectVersion::from(self.version()), vendor)
    }

    /// The spatial SQL names valid on this connection.
    fn profile(&self) -> DialectProfile {
        self.server_info().profile()
    }
}

impl<T: DatabaseInterface + ?Sized> DatabaseInterface for &T {
    fn version(&self) -> u32 {
        (**self).version()
    }

    fn is_mariadb(&self) -> bool {
        (**self).is_mariadb()
    }

    fn try_query(&self, sql: &str) -> Option<Row> {
        (**self).try_query(sql)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::database::MockDatabase;

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::from("POINT(1 2)").to_string(), "POINT(1 2)");
        assert_eq!(FieldValue::from(4326).to_string(), "4326");
        assert_eq!(FieldValue::from(0.5).to_string(), "0.5");
    }

    #[test]
    fn profile_from_facade() {
        let db = MockDatabase::new(80001);
        assert!(db.profile().supports_axis_order_directive);

        let db = MockDatabase::new(80001).mariadb();
        assert_eq!(db.server_info().vendor, Vendor::MariaDb);
        assert!(!db.profile().supports_axis_order_directive);
        assert_eq!(db.profile().text_fn, "ST_ASTEXT");
    }

    #[test]
    fn facade_by_reference() {
        fn version_of(db: impl DatabaseInterface) -> u32 {
            db.version()
        }
        let db = MockDatabase::new(50744);
        assert_eq!(version_of(&db), 50744);
    }
}
