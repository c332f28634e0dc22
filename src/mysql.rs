//! Run the spatial helpers against a live MySQL or MariaDB server through `sqlx`.

use sqlx::mysql::MySqlRow;
use sqlx::{Executor, MySql, Row};
use tracing::{debug, warn};

use crate::database::FieldValue;
use crate::dialect::{DialectProfile, ServerInfo};
use crate::error::Result;
use crate::wkt::{well_known_text_query, WktPayload};

/// Identify the server behind `executor` from `SELECT VERSION()`.
pub async fn detect_server<'c, E: Executor<'c, Database = MySql>>(
    executor: E,
) -> Result<ServerInfo> {
    let version: String = sqlx::query_scalar("SELECT VERSION()")
        .fetch_one(executor)
        .await?;
    debug!(version = %version, "detected server version");
    ServerInfo::from_version_string(&version)
}

fn column_value(row: &MySqlRow, i: usize) -> Option<FieldValue> {
    if let Ok(value) = row.try_get::<Option<String>, _>(i) {
        return value.map(FieldValue::Text);
    }
    if let Ok(value) = row.try_get::<Option<u32>, _>(i) {
        return value.map(|value| FieldValue::Int(value.into()));
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(i) {
        return value.map(FieldValue::Int);
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(i) {
        return value.map(FieldValue::Float);
    }
    // Text functions return binary strings under some connection charsets.
    match row.try_get::<Option<Vec<u8>>, _>(i) {
        Ok(value) => {
            value.map(|bytes| FieldValue::Text(String::from_utf8_lossy(&bytes).into_owned()))
        }
        Err(err) => {
            warn!(column = i, error = %err, "undecodable column in WKT result");
            None
        }
    }
}

/// Convert a stored geometry value to WKT on the server behind `executor`.
///
/// Behaves like [`convert_to_well_known_text`][crate::convert_to_well_known_text]: a failed
/// query is logged and yields an empty result rather than an error.
pub async fn read_well_known_text<'c, E: Executor<'c, Database = MySql>>(
    executor: E,
    data: &[u8],
    include_srid: bool,
    profile: &DialectProfile,
) -> String {
    let sql = well_known_text_query(data, profile, include_srid);
    debug!(sql = %sql, "converting geometry to WKT");

    let row = match sqlx::query(&sql).fetch_optional(executor).await {
        Ok(Some(row)) => Some(
            (0..row.len())
                .map(|i| column_value(&row, i))
                .collect::<Vec<_>>(),
        ),
        Ok(None) => None,
        Err(err) => {
            warn!(sql = %sql, error = %err, "geometry to WKT conversion failed");
            None
        }
    };

    WktPayload::from_row(row.as_deref(), include_srid).render(include_srid)
}
