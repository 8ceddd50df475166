use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Query against table '{table}' failed")]
    Sql {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Unparseable DATETIME '{value}' in table '{table}' (expected YYYY-MM-DD HH:MM:SS)")]
    TimestampParse {
        table: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl QueryError {
    pub(crate) fn sql(table: &'static str) -> impl FnOnce(rusqlite::Error) -> QueryError {
        move |source| QueryError::Sql { table, source }
    }
}
