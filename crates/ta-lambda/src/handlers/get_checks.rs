//! List Trusted Advisor checks and start the per-check workflow for one account.

use anyhow::Result;
use ta_core::config::ChecksConfig;
use ta_core::fanout::check_records;
use ta_core::{AccountRecord, ExecutionReceipt};

use super::common::{start_workflow, STARTED_STATUS_CODE};
use crate::context::HandlerContext;

pub async fn handle(ctx: &HandlerContext, account: AccountRecord) -> Result<ExecutionReceipt> {
    let config = ChecksConfig::load(ctx.env())?;

    ctx.log.info("Extracting Trusted Advisor Check Details");
    let checks = ctx.services.support.describe_checks(&config.language).await?;
    let records = check_records(&checks, &config.categories, &config.language, &account);
    ctx.log.info(format_args!(
        "Got {} TA Checks in categories {}",
        records.len(),
        config.categories.join(",")
    ));

    let execution_arn = start_workflow(ctx, &config.state_machine_arn, &records).await?;
    Ok(ExecutionReceipt::keyed(
        STARTED_STATUS_CODE,
        "sfn_execution_arn",
        &execution_arn,
    ))
}
