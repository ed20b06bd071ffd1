//! Fetch one check result for one account and land it as CSV files.

use anyhow::{Context, Result};
use ta_core::config::ExtractConfig;
use ta_core::layout::{details_file_name, details_prefix, summary_file_name, summary_prefix};
use ta_core::report::{details_table, summary_table, DetailsFile, SummaryFile};
use ta_core::{CheckRecord, CsvTable, ExtractOutcome, ExtractReport, ScratchDir};

use super::common::{assume_member_role, STARTED_STATUS_CODE};
use crate::context::HandlerContext;

pub async fn handle(ctx: &HandlerContext, record: CheckRecord) -> Result<ExtractOutcome> {
    let Some(config) = ExtractConfig::load(ctx.env(), &record.check_id)? else {
        let skipped = ExtractOutcome::skipped(&record.check_id);
        ctx.log.info(format_args!("{:?}", skipped));
        return Ok(skipped);
    };

    let account_id = &record.account.account_id;
    let credentials = assume_member_role(ctx, &config.role_name, &config.bucket, account_id).await?;
    let advisor = ctx.services.members.trusted_advisor(&credentials);
    let result = advisor
        .check_result(&record.check_id, &record.language)
        .await?;

    let summary = summary_table(&record, &config.summary_header, &result);
    let details = details_table(&record, &config.layout, &result)?;
    for row in summary.rows.iter().chain(details.rows.iter()) {
        ctx.log.row(row);
    }

    let scratch = ScratchDir::new()?;
    let summary_name =
        summary_file_name(&record.check_id, account_id, &record.account.date, ctx.now);
    let details_name =
        details_file_name(&record.check_id, account_id, &record.account.date, ctx.now);

    let summary_size = land(
        ctx,
        &scratch,
        &config.bucket,
        &summary_prefix(&record.category, ctx.now),
        &summary_name,
        &summary,
    )
    .await?;
    let details_size = land(
        ctx,
        &scratch,
        &config.bucket,
        &details_prefix(&record.category, &record.check_id, ctx.now),
        &details_name,
        &details,
    )
    .await?;
    scratch.close()?;

    Ok(ExtractOutcome::Extracted(ExtractReport {
        status: STARTED_STATUS_CODE,
        check_id: record.check_id.clone(),
        file_details: (
            SummaryFile {
                name: summary_name,
                size: summary_size,
            },
            DetailsFile {
                name: details_name,
                size: details_size,
            },
        ),
    }))
}

/// Write `table` to scratch space and upload it under `prefix`. Tables
/// without data rows are skipped and report a size of zero.
async fn land(
    ctx: &HandlerContext,
    scratch: &ScratchDir,
    bucket: &str,
    prefix: &str,
    file_name: &str,
    table: &CsvTable,
) -> Result<u64> {
    if !table.has_rows() {
        ctx.log.info(format_args!("No rows for {}; not uploading", file_name));
        return Ok(0);
    }
    let staged = scratch.write_csv(file_name, table)?;
    let key = format!("{}{}", prefix, file_name);
    ctx.services
        .objects
        .upload_file(bucket, &key, &staged.path)
        .await
        .with_context(|| format!("Failed to upload s3://{}/{}", bucket, key))?;
    ctx.log.info(format_args!(
        "Uploaded s3://{}/{} ({} bytes)",
        bucket, key, staged.size
    ));
    Ok(staged.size)
}
