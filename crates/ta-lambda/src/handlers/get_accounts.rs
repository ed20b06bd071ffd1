//! Discover member accounts and start one extraction workflow per batch.

use anyhow::{Context, Result};
use ta_core::accounts::{active_accounts, parse_account_file};
use ta_core::config::{AccountSource, AccountsConfig};
use ta_core::fanout::account_batches;
use ta_core::{AccountRecord, ExecutionReceipt, RunStamp};

use super::common::{start_workflow, STARTED_STATUS_CODE};
use crate::context::HandlerContext;
use crate::metrics::UsageMetric;

pub async fn handle(ctx: &HandlerContext) -> Result<Vec<ExecutionReceipt>> {
    let config = AccountsConfig::load(ctx.env())?;
    let stamp = RunStamp::at(ctx.now);

    let accounts = discover(ctx, &config.source, &stamp).await?;
    ctx.log.info(format_args!("Found {} active accounts", accounts.len()));

    let mut receipts = Vec::new();
    for batch in account_batches(&accounts) {
        let execution_arn = start_workflow(ctx, &config.ta_state_machine_arn, batch).await?;
        receipts.push(ExecutionReceipt::keyed(
            STARTED_STATUS_CODE,
            "TA_data_extract_sfn_execution_ret",
            &execution_arn,
        ));

        if let Some(tag_arn) = &config.tag_state_machine_arn {
            let execution_arn = start_workflow(ctx, tag_arn, batch).await?;
            receipts.push(ExecutionReceipt::keyed(
                STARTED_STATUS_CODE,
                "tag_data_extract_sfn_execution_ret",
                &execution_arn,
            ));
        }
    }

    if let Some(metric) = &config.metric {
        ctx.services
            .usage
            .report(&UsageMetric::new(metric, ctx.now))
            .await;
    }
    Ok(receipts)
}

async fn discover(
    ctx: &HandlerContext,
    source: &AccountSource,
    stamp: &RunStamp,
) -> Result<Vec<AccountRecord>> {
    match source {
        AccountSource::Organizations => {
            ctx.log.info("Listing accounts from AWS Organizations");
            let listed = ctx.services.accounts.list_accounts().await?;
            Ok(active_accounts(listed, stamp))
        }
        AccountSource::File { bucket, object } => {
            ctx.log
                .info(format_args!("Reading accounts from s3://{}/{}", bucket, object));
            let contents = ctx.services.objects.get_object(bucket, object).await?;
            let accounts = parse_account_file(&contents, stamp)
                .with_context(|| format!("Invalid account file s3://{}/{}", bucket, object))?;
            Ok(accounts)
        }
    }
}
