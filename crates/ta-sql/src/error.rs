//! Error types for ta-sql

use thiserror::Error;

/// SQL rendering and inspection errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL parse error (S001)
    #[error("[S001] SQL parse error at line {line}, column {column}: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Empty SQL (S002)
    #[error("[S002] SQL is empty")]
    EmptySql,

    /// Statement is not a view over a single SELECT (S003)
    #[error("[S003] Unsupported SQL statement: {0}")]
    UnsupportedStatement(String),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
