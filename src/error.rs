//! Defines [`GisError`], representing all errors returned by this crate.

use thiserror::Error;

/// Enum with all errors in this crate.
///
/// The display helpers themselves never fail: malformed input and failed queries degrade to
/// empty or passthrough output. Only parsing and server detection surface errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GisError {
    /// A server version string without a leading numeric version.
    #[error("Invalid server version: {0}")]
    InvalidVersion(String),

    /// A name outside the closed set of geometry types.
    #[error("Unknown geometry type: {0}")]
    UnknownGeometryType(String),

    /// General error.
    #[error("General error: {0}")]
    General(String),

    /// [sqlx::Error]
    #[cfg(feature = "mysql")]
    #[error(transparent)]
    SqlxError(#[from] sqlx::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GisError>;
