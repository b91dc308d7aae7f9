//! MySQL repository implementations
//!
//! Identifiers are stored as `CHAR(36)` hyphenated UUIDs and enums as their
//! wire names. Points live in `POINT SRID 4326` columns, written from WKT in
//! longitude-latitude order and read back through `ST_Longitude`/`ST_Latitude`.

pub mod order_repository_impl;
pub mod product_repository_impl;
pub mod user_repository_impl;

pub use order_repository_impl::MySqlOrderRepository;
pub use product_repository_impl::MySqlProductRepository;
pub use user_repository_impl::MySqlUserRepository;

use dm_core::errors::DomainError;
use dm_shared::GeoPoint;
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use uuid::Uuid;

/// SQL expression turning a bound WKT string into a geographic point
pub(crate) const POINT_FROM_WKT: &str = "ST_GeomFromText(?, 4326, 'axis-order=long-lat')";

pub(crate) fn database_error(context: &str, error: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("{}: {}", context, error),
    }
}

/// Read a column, mapping decode failures to `DomainError::Database`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name)
        .map_err(|e| database_error(&format!("Failed to get {}", name), e))
}

pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Database {
        message: format!("Invalid UUID in {}: {}", field, e),
    })
}

/// Rebuild a point from the `<prefix>_lng` and `<prefix>_lat` projections
pub(crate) fn point(row: &MySqlRow, prefix: &str) -> Result<GeoPoint, DomainError> {
    let lng: f64 = column(row, &format!("{}_lng", prefix))?;
    let lat: f64 = column(row, &format!("{}_lat", prefix))?;
    Ok(GeoPoint::new(lng, lat))
}

/// Parse an enum column through its `FromStr` implementation
pub(crate) fn parse_enum<T>(row: &MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value: String = column(row, name)?;
    value.parse().map_err(|e: T::Err| DomainError::Database {
        message: format!("Invalid value in {}: {}", name, e),
    })
}

/// Whether the driver reported a duplicate key (MySQL error 1062)
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}
