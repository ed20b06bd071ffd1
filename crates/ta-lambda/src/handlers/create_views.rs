//! Create or replace the Athena views over the crawled tables.

use anyhow::{Context, Result};
use serde::Serialize;
use ta_aws::QueryRequest;
use ta_core::config::ViewsConfig;
use ta_core::layout::query_output_location;
use ta_sql::{generate_views, include_tags, view_catalog, TAGS_TABLE};

use crate::context::HandlerContext;

/// One submitted view statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedView {
    pub query_id: String,
    pub view_name: String,
    pub query_execution_id: String,
}

/// Submit every catalog view. Queries are started, not awaited; Athena
/// reports failures in its own query history.
pub async fn handle(ctx: &HandlerContext) -> Result<Vec<SubmittedView>> {
    let config = ViewsConfig::load(ctx.env())?;

    let tags_present = ctx
        .services
        .catalog
        .table_exists(&config.database, TAGS_TABLE)
        .await?;
    ctx.log.info(format_args!(
        "Tags table in {}: {}",
        config.database,
        if tags_present { "PRESENT" } else { "NULL" }
    ));
    if !include_tags(&config.tags, tags_present) && !config.tags.is_empty() {
        ctx.log.info("Tags configured but no tags table yet; creating views without tags");
    }

    let views = generate_views(&view_catalog(), &config.tags, tags_present);
    let mut submitted = Vec::with_capacity(views.len());
    for view in views {
        let request = QueryRequest {
            query: view.sql,
            database: config.database.clone(),
            work_group: config.work_group.clone(),
            output_location: query_output_location(&config.output_bucket, &view.query_id, ctx.now),
        };
        ctx.log.debug(format_args!("{}: {}", view.query_id, request.query));
        let query_execution_id = ctx
            .services
            .queries
            .start_query(&request)
            .await
            .with_context(|| format!("Failed to submit {}", view.query_id))?;
        ctx.log.info(format_args!(
            "Submitted {} as query {}",
            view.view_name, query_execution_id
        ));
        submitted.push(SubmittedView {
            query_id: view.query_id,
            view_name: view.view_name,
            query_execution_id,
        });
    }
    Ok(submitted)
}
