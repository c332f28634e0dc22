use std::cell::RefCell;

use crate::database::{DatabaseInterface, FieldValue, Row};

/// In-memory connection that answers every query with the same row.
pub(crate) struct MockDatabase {
    version: u32,
    mariadb: bool,
    row: Option<Row>,
    queries: RefCell<Vec<String>>,
}

impl MockDatabase {
    /// A MySQL server of the given version whose queries all fail.
    pub(crate) fn new(version: u32) -> Self {
        Self {
            version,
            mariadb: false,
            row: None,
            queries: RefCell::new(vec![]),
        }
    }

    pub(crate) fn mariadb(mut self) -> Self {
        self.mariadb = true;
        self
    }

    pub(crate) fn with_row(mut self, row: Vec<Option<FieldValue>>) -> Self {
        self.row = Some(row);
        self
    }

    /// Every statement run so far, in order.
    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl DatabaseInterface for MockDatabase {
    fn version(&self) -> u32 {
        self.version
    }

    fn is_mariadb(&self) -> bool {
        self.mariadb
    }

    fn try_query(&self, sql: &str) -> Option<Row> {
        self.queries.borrow_mut().push(sql.to_string());
        self.row.clone()
    }
}

/// `POINT(1 2)` with SRID 4326 in the MySQL internal storage format: a little-endian SRID
/// followed by WKB.
pub(crate) const POINT_HEX: &str = "e61000000101000000000000000000f03f0000000000000040";

pub(crate) fn point_value() -> Vec<u8> {
    let mut wkb = 4326u32.to_le_bytes().to_vec();
    wkb.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x00]);
    wkb.extend_from_slice(&1.0f64.to_le_bytes());
    wkb.extend_from_slice(&2.0f64.to_le_bytes());
    wkb
}
