//! SQL parser wrapper

use crate::dialect::{AthenaDialect, SqlDialect};
use crate::error::{SqlError, SqlResult};
use sqlparser::ast::Statement;

/// SQL parser that wraps sqlparser-rs with dialect support
pub struct SqlParser {
    dialect: Box<dyn SqlDialect>,
}

impl SqlParser {
    /// Create a new parser with the Athena dialect
    pub fn athena() -> Self {
        Self {
            dialect: Box::new(AthenaDialect::new()),
        }
    }

    /// Parse SQL into AST statements
    pub fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::EmptySql);
        }

        self.dialect.parse(sql)
    }

    /// Parse SQL and return the first statement
    pub fn parse_single(&self, sql: &str) -> SqlResult<Statement> {
        let stmts = self.parse(sql)?;
        stmts.into_iter().next().ok_or(SqlError::EmptySql)
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::athena()
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
