//! Spatial column helpers for MySQL and MariaDB administration tools.
//!
//! This crate converts stored geometry values to Well-Known Text, wraps user-entered WKT in the
//! right constructor call, and lists the geometry types and spatial functions a server offers.
//! All naming differences between server versions are resolved through a [`DialectProfile`].
//!
//! Database access goes through the [`DatabaseInterface`] trait. With the `mysql` feature, the
//! [`mysql`] module runs the same queries on an `sqlx` connection.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use constructor::{create_data, create_data_with_profile};
pub use database::{DatabaseInterface, FieldValue, Row};
pub use dialect::{DialectProfile, DialectVersion, ServerInfo, Vendor};
pub use error::{GisError, Result};
pub use functions::{
    get_functions, get_functions_for, CatalogEntry, FunctionCatalog, ReturnKind, Separator,
    SpatialFunction,
};
pub use geometry_type::{get_data_types, GeometryType};
pub use wkt::{
    convert_to_well_known_text, fetch_well_known_text, well_known_text_query, WktPayload,
};

mod constructor;
pub mod database;
pub mod dialect;
pub mod error;
pub mod functions;
mod geometry_type;
#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(test)]
pub(crate) mod test;
mod wkt;
