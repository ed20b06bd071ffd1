//! SQL dialect abstraction
//!
//! sqlparser has no Athena dialect. Athena DDL and queries are Trino SQL,
//! which the generic dialect parses for everything the view catalog emits.

use sqlparser::ast::Statement;
use sqlparser::dialect::{Dialect, GenericDialect};
use sqlparser::parser::Parser;

use crate::error::{SqlError, SqlResult};

/// Trait for SQL dialect implementations
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect
    fn parser_dialect(&self) -> &dyn Dialect;

    /// Parse SQL into AST statements
    fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        Parser::parse_sql(self.parser_dialect(), sql).map_err(|e| {
            let msg = e.to_string();
            let (line, column) = parse_location_from_error(&msg);
            SqlError::ParseError {
                message: msg,
                line,
                column,
            }
        })
    }
}

/// Double-quote an identifier, doubling any embedded quote.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Single-quote a string literal, doubling any embedded quote.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Parse line and column from a sqlparser error message.
///
/// `ParserError` carries no structured location, so "Line: N, Column: M" is
/// read back out of the message text.
fn parse_location_from_error(msg: &str) -> (usize, usize) {
    let Some(line_idx) = msg.find("Line: ") else {
        return (0, 0);
    };
    let line_start = line_idx + 6;
    let Some(comma_idx) = msg[line_start..].find(',') else {
        return (0, 0);
    };
    let Ok(line) = msg[line_start..line_start + comma_idx]
        .trim()
        .parse::<usize>()
    else {
        return (0, 0);
    };
    let Some(col_idx) = msg.find("Column: ") else {
        return (0, 0);
    };
    let col_start = col_idx + 8;
    let col_end = msg[col_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| col_start + i)
        .unwrap_or(msg.len());
    let Ok(column) = msg[col_start..col_end].trim().parse::<usize>() else {
        return (0, 0);
    };
    (line, column)
}

/// Athena (Trino) SQL dialect
#[derive(Debug, Default)]
pub struct AthenaDialect {
    dialect: GenericDialect,
}

impl AthenaDialect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SqlDialect for AthenaDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
