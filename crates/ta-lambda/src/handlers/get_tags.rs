//! Fan out tag extraction for one account across regions and resource types.

use anyhow::Result;
use ta_core::config::TagsConfig;
use ta_core::fanout::tag_tasks;
use ta_core::{AccountRecord, ExecutionReceipt};

use super::common::{start_workflow, STARTED_STATUS_CODE};
use crate::context::HandlerContext;

pub async fn handle(ctx: &HandlerContext, account: AccountRecord) -> Result<ExecutionReceipt> {
    let config = TagsConfig::load(ctx.env())?;

    ctx.log.info("Getting a list of AWS Regions");
    let regions = ctx.services.regions.list_regions().await?;
    let tasks = tag_tasks(&config.resource_types, &regions, &account);
    for task in &tasks {
        ctx.log.record("Tag task", &serde_json::to_value(task)?);
    }
    ctx.log.info(format_args!(
        "Generated {} tag tasks over {} regions",
        tasks.len(),
        regions.len()
    ));

    let execution_arn = start_workflow(ctx, &config.state_machine_arn, &tasks).await?;
    Ok(ExecutionReceipt::bare(STARTED_STATUS_CODE, &execution_arn))
}
