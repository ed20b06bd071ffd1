//! Turn the view catalog into statements for one invocation.

use crate::builder::{TagJoin, ViewStatement};
use crate::catalog::ViewSpec;
use serde::Serialize;

/// A rendered view ready for submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedView {
    pub check_id: String,
    pub query_id: String,
    pub view_name: String,
    pub sql: String,
}

/// Tag columns are joined only when tags were requested and the crawler has
/// created the tags table. Otherwise every view falls back to its plain form.
pub fn include_tags(tags: &[String], tags_table_present: bool) -> bool {
    tags_table_present && !tags.is_empty()
}

/// Build the statement for a single view.
pub fn view_statement(spec: &ViewSpec, tags: &[String], include_tags: bool) -> ViewStatement {
    let tag_join = match spec.tag_resource_column {
        Some(column) if include_tags => Some(TagJoin {
            resource_column: column.to_string(),
            tags: tags.to_vec(),
        }),
        _ => None,
    };
    ViewStatement {
        view_name: spec.view_name.to_string(),
        base_table: spec.base_table.clone(),
        columns: spec.columns.clone(),
        tag_join,
    }
}

/// Render every view of `catalog`, in catalog order.
pub fn generate_views(
    catalog: &[ViewSpec],
    tags: &[String],
    tags_table_present: bool,
) -> Vec<GeneratedView> {
    let include = include_tags(tags, tags_table_present);
    catalog
        .iter()
        .map(|spec| GeneratedView {
            check_id: spec.check_id.to_string(),
            query_id: spec.query_id(),
            view_name: spec.view_name.to_string(),
            sql: view_statement(spec, tags, include).to_sql(),
        })
        .collect()
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
