//! Typed builder for the Athena view statements.
//!
//! Every identifier passes through [`quote_ident`] and every string through
//! [`quote_literal`], so configured tag names cannot escape their quotes.

use crate::dialect::{quote_ident, quote_literal};
use std::fmt::{self, Display, Formatter};

/// Name of the shared table holding exported resource tags.
pub const TAGS_TABLE: &str = "tags";

/// Column of the tags table that holds the resource id.
pub const TAGS_RESOURCE_COLUMN: &str = "resourceid";

/// Timestamp column present on every landed table.
pub const DATETIME_COLUMN: &str = "datetime";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    And,
}

impl BinaryOp {
    fn as_sql(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "=",
            BinaryOp::And => "AND",
        }
    }
}

/// A scalar SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference, optionally qualified by its table.
    Column { table: Option<String>, name: String },
    Str(String),
    Int(i64),
    /// Call of a built-in function. Names are fixed by the catalog.
    Func { name: &'static str, args: Vec<Expr> },
    Cast {
        expr: Box<Expr>,
        data_type: &'static str,
    },
    /// Binary operation, always rendered parenthesized.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn col(table: &str, name: &str) -> Self {
        Expr::Column {
            table: Some(table.to_string()),
            name: name.to_string(),
        }
    }

    pub fn bare_col(name: &str) -> Self {
        Expr::Column {
            table: None,
            name: name.to_string(),
        }
    }

    pub fn str(value: &str) -> Self {
        Expr::Str(value.to_string())
    }

    pub fn int(value: i64) -> Self {
        Expr::Int(value)
    }

    pub fn func(name: &'static str, args: Vec<Expr>) -> Self {
        Expr::Func { name, args }
    }

    pub fn cast(self, data_type: &'static str) -> Self {
        Expr::Cast {
            expr: Box::new(self),
            data_type,
        }
    }

    pub fn binary(self, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column {
                table: Some(table),
                name,
            } => write!(f, "{}.{}", quote_ident(table), quote_ident(name)),
            Expr::Column { table: None, name } => f.write_str(&quote_ident(name)),
            Expr::Str(value) => f.write_str(&quote_literal(value)),
            Expr::Int(value) => write!(f, "{}", value),
            Expr::Func { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Cast { expr, data_type } => write!(f, "CAST({} AS {})", expr, data_type),
            Expr::Binary { left, op, right } => write!(f, "({} {} {})", left, op.as_sql(), right),
        }
    }
}

/// A derived column of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectColumn {
    pub expr: Expr,
    pub alias: String,
}

impl SelectColumn {
    pub fn new(expr: Expr, alias: &str) -> Self {
        Self {
            expr,
            alias: alias.to_string(),
        }
    }
}

impl Display for SelectColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS {}", self.expr, quote_ident(&self.alias))
    }
}

/// Left join of a base table onto the tags table.
#[derive(Debug, Clone, PartialEq)]
pub struct TagJoin {
    /// Base-table column holding the resource id.
    pub resource_column: String,
    /// Tag columns appended to the projection, in order.
    pub tags: Vec<String>,
}

/// One `CREATE OR REPLACE VIEW ... AS SELECT ...` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewStatement {
    pub view_name: String,
    pub base_table: String,
    pub columns: Vec<SelectColumn>,
    pub tag_join: Option<TagJoin>,
}

impl ViewStatement {
    /// Join predicate linking a base row to the tag row exported at the same
    /// time for the same resource.
    fn join_predicate(&self, join: &TagJoin) -> Expr {
        let same_resource = Expr::col(&self.base_table, &join.resource_column)
            .binary(BinaryOp::Eq, Expr::col(TAGS_TABLE, TAGS_RESOURCE_COLUMN));
        let same_export = Expr::col(&self.base_table, DATETIME_COLUMN)
            .binary(BinaryOp::Eq, Expr::col(TAGS_TABLE, DATETIME_COLUMN));
        same_resource.binary(BinaryOp::And, same_export)
    }

    /// Render the SELECT body of the view.
    pub fn select_sql(&self) -> String {
        let base = quote_ident(&self.base_table);
        let mut items = vec![format!("{}.*", base)];
        items.extend(self.columns.iter().map(|c| c.to_string()));

        let from = match &self.tag_join {
            Some(join) => {
                items.extend(
                    join.tags
                        .iter()
                        .map(|tag| Expr::col(TAGS_TABLE, tag).to_string()),
                );
                format!(
                    "({} LEFT JOIN {} ON {})",
                    base,
                    quote_ident(TAGS_TABLE),
                    self.join_predicate(join)
                )
            }
            None => base,
        };

        format!("SELECT {} FROM {}", items.join(", "), from)
    }

    /// Render the full statement.
    pub fn to_sql(&self) -> String {
        format!(
            "CREATE OR REPLACE VIEW {} AS {}",
            quote_ident(&self.view_name),
            self.select_sql()
        )
    }
}

impl Display for ViewStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
