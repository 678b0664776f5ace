//! Error types for sqlgen

use crate::dsn::DsnError;
use thiserror::Error;

/// Result type for sqlgen operations.
pub type SqlgenResult<T> = Result<T, SqlgenError>;

/// Error type for sqlgen operations.
#[derive(Debug, Error)]
pub enum SqlgenError {
    /// The connection string could not be parsed.
    #[error(transparent)]
    Dsn(#[from] DsnError),
    /// Opening or closing the database connection failed.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A catalog query failed.
    #[error("Catalog query error: {0}")]
    Query(String),
    /// Decode error when reading a column.
    #[error("Decode error for column '{column}': {message}")]
    Decode { column: String, message: String },
    /// The table name could not be recovered from a generated statement.
    #[error("failed to extract table name from SQL: {0}")]
    TableName(String),
    /// An action tag other than `create` or `read`.
    #[error("unknown action: {0}")]
    UnknownAction(String),
    /// Missing or inconsistent settings.
    #[error("Config error: {0}")]
    Config(String),
}

impl SqlgenError {
    /// Create a decode error.
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        SqlgenError::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(err: impl std::fmt::Display) -> Self {
        SqlgenError::Connection(err.to_string())
    }
}

impl From<tokio_postgres::Error> for SqlgenError {
    fn from(err: tokio_postgres::Error) -> Self {
        SqlgenError::Query(err.to_string())
    }
}

impl From<sqlx::Error> for SqlgenError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { index, source } => {
                SqlgenError::decode(index, source.to_string())
            }
            sqlx::Error::ColumnNotFound(column) => SqlgenError::decode(column, "column not found"),
            other => SqlgenError::Query(other.to_string()),
        }
    }
}
