//! SQLite persistence layer: the connection wrapper plus one repository
//! per entity. Repositories are plain structs holding a [`DbConnection`];
//! services receive them through constructors rather than any ambient
//! global state.

pub mod db;
pub mod repositories;
#[cfg(test)]
pub(crate) mod test_support;

pub use db::DbConnection;

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

use crate::domain::errors::{DomainError, Result};

/// Money is persisted as TEXT (the SQLite driver has no decimal type);
/// parse it back exactly on the way out.
pub(crate) fn read_decimal(row: &SqliteRow, col: &str) -> Result<Decimal> {
    let raw: String = row.get(col);
    Decimal::from_str(&raw)
        .map_err(|e| DomainError::Internal(format!("malformed decimal in column {col}: {e}")))
}

pub(crate) fn read_decimal_opt(row: &SqliteRow, col: &str) -> Result<Option<Decimal>> {
    let raw: Option<String> = row.get(col);
    raw.map(|v| {
        Decimal::from_str(&v)
            .map_err(|e| DomainError::Internal(format!("malformed decimal in column {col}: {e}")))
    })
    .transpose()
}

/// Read a TEXT column holding one of the wire enums.
pub(crate) fn read_parsed<T>(row: &SqliteRow, col: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.get(col);
    raw.parse().map_err(DomainError::Internal)
}
