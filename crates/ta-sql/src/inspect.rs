//! Read the shape of a rendered view back out of its SQL.
//!
//! Used to check that generated statements parse and keep the base table,
//! tag join and column order they were built with.

use crate::builder::TAGS_TABLE;
use crate::error::{SqlError, SqlResult};
use crate::parser::SqlParser;
use serde::Serialize;
use sqlparser::ast::{
    Expr, ObjectName, ObjectNamePart, Query, SelectItem, SelectItemQualifiedWildcardKind, SetExpr,
    TableFactor, TableWithJoins, Visit, Visitor,
};
use std::ops::ControlFlow;

/// Structure of a parsed view statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewShape {
    /// Name of the created view; `None` for a bare SELECT.
    pub view_name: Option<String>,
    pub base_table: String,
    pub has_tag_join: bool,
    /// Output column names in projection order. Wildcards appear as `table.*`.
    pub columns: Vec<String>,
}

/// Collects the created relation and the top-level query.
#[derive(Default)]
struct ViewParts {
    view_name: Option<String>,
    query: Option<Query>,
}

impl Visitor for ViewParts {
    type Break = ();

    fn pre_visit_relation(&mut self, relation: &ObjectName) -> ControlFlow<Self::Break> {
        if self.query.is_none() && self.view_name.is_none() {
            self.view_name = Some(object_name_to_string(relation));
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        self.query = Some(query.clone());
        ControlFlow::Break(())
    }
}

/// Parse `sql` and describe the view it defines.
pub fn inspect_view(sql: &str) -> SqlResult<ViewShape> {
    let statement = SqlParser::athena().parse_single(sql)?;
    let mut parts = ViewParts::default();
    let _ = statement.visit(&mut parts);

    let query = parts
        .query
        .ok_or_else(|| SqlError::UnsupportedStatement("statement has no query".to_string()))?;
    let SetExpr::Select(select) = query.body.as_ref() else {
        return Err(SqlError::UnsupportedStatement(
            "view body is not a plain SELECT".to_string(),
        ));
    };
    let from = select
        .from
        .first()
        .ok_or_else(|| SqlError::UnsupportedStatement("SELECT has no FROM".to_string()))?;
    let (base_table, has_tag_join) = base_and_join(from)
        .ok_or_else(|| SqlError::UnsupportedStatement("unrecognised FROM clause".to_string()))?;

    Ok(ViewShape {
        view_name: parts.view_name,
        base_table,
        has_tag_join,
        columns: select.projection.iter().map(column_name).collect(),
    })
}

fn base_and_join(from: &TableWithJoins) -> Option<(String, bool)> {
    let joins_tags = from.joins.iter().any(|join| match &join.relation {
        TableFactor::Table { name, .. } => {
            object_name_to_string(name).eq_ignore_ascii_case(TAGS_TABLE)
        }
        _ => false,
    });
    match &from.relation {
        TableFactor::Table { name, .. } => Some((object_name_to_string(name), joins_tags)),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => base_and_join(table_with_joins).map(|(base, nested)| (base, nested || joins_tags)),
        _ => None,
    }
}

fn column_name(item: &SelectItem) -> String {
    match item {
        SelectItem::ExprWithAlias { alias, .. } => alias.value.clone(),
        SelectItem::UnnamedExpr(Expr::CompoundIdentifier(idents)) => idents
            .last()
            .map(|ident| ident.value.clone())
            .unwrap_or_default(),
        SelectItem::UnnamedExpr(Expr::Identifier(ident)) => ident.value.clone(),
        SelectItem::UnnamedExpr(expr) => expr.to_string(),
        SelectItem::QualifiedWildcard(kind, _) => match kind {
            SelectItemQualifiedWildcardKind::ObjectName(name) => {
                format!("{}.*", object_name_to_string(name))
            }
            SelectItemQualifiedWildcardKind::Expr(expr) => format!("{}.*", expr),
        },
        SelectItem::Wildcard(_) => "*".to_string(),
    }
}

fn object_name_to_string(name: &ObjectName) -> String {
    name.0
        .iter()
        .map(|part| match part {
            ObjectNamePart::Identifier(ident) => ident.value.clone(),
            #[allow(unreachable_patterns)]
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
#[path = "inspect_test.rs"]
mod tests;
