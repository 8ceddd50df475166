pub mod bikes;
pub mod error;
pub mod stations;
pub mod weather;

use crate::queries::error::QueryError;
use crate::types::timestamp::parse_datetime;
use chrono::NaiveDateTime;
use log::debug;
use rusqlite::{Connection, Params, Row};

/// Parses a `DATETIME` value read from `table`, keeping the offending text on failure.
pub(crate) fn parse_table_datetime(
    table: &'static str,
    value: String,
) -> Result<NaiveDateTime, QueryError> {
    parse_datetime(&value).map_err(|source| QueryError::TimestampParse {
        table,
        value,
        source,
    })
}

/// Prepares `sql`, runs it with `params` and maps every row with `map_row`.
pub(crate) fn fetch_rows<T, P, F>(
    conn: &Connection,
    table: &'static str,
    sql: &str,
    params: P,
    map_row: F,
) -> Result<Vec<T>, QueryError>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    debug!("{} query: {}", table, sql.trim());
    let mut stmt = conn.prepare(sql).map_err(QueryError::sql(table))?;
    let rows = stmt
        .query_map(params, map_row)
        .map_err(QueryError::sql(table))?
        .collect::<rusqlite::Result<Vec<T>>>()
        .map_err(QueryError::sql(table))?;
    Ok(rows)
}
