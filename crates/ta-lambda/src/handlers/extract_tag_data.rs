//! Export the customer tag keys of one resource type in one account region.

use anyhow::{Context, Result};
use serde::Serialize;
use ta_core::config::TagExtractConfig;
use ta_core::layout::{tags_file_name, tags_prefix};
use ta_core::{ScratchDir, TagCollector, TagTaskRecord};

use super::common::assume_member_role;
use crate::context::HandlerContext;

/// The uploaded tag export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagExport {
    pub file_name: String,
    pub file_size: u64,
    pub resource_count: usize,
}

/// Returns `None` when no keys are configured or no resource carries any of
/// them; nothing is written in that case.
pub async fn handle(ctx: &HandlerContext, task: TagTaskRecord) -> Result<Option<TagExport>> {
    let config = TagExtractConfig::load(ctx.env())?;
    if config.customer_keys.is_empty() {
        ctx.log.info("CustomerKeys is empty; no tags to extract");
        return Ok(None);
    }
    ctx.log
        .info(format_args!("Tags: {}", config.customer_keys.join(",")));

    let account_id = &task.account.account_id;
    let credentials = assume_member_role(ctx, &config.role_name, &config.bucket, account_id).await?;
    let tagging = ctx.services.members.tagging(&credentials, &task.region);

    let mut collector = TagCollector::new(config.customer_keys.clone());
    for key in &config.customer_keys {
        let resources = tagging
            .tagged_resources(&task.resource_type, key)
            .await?;
        ctx.log.debug(format_args!(
            "{} {} resources in {} carry tag {}",
            resources.len(),
            task.resource_type,
            task.region,
            key
        ));
        collector.add(key, &resources);
    }
    if collector.is_empty() {
        ctx.log.info(format_args!(
            "No {} resources in {} carry the configured tags",
            task.resource_type, task.region
        ));
        return Ok(None);
    }

    let resource_count = collector.len();
    let table = collector.into_table(&task);
    let file_name = tags_file_name(
        &task.resource_type,
        account_id,
        &task.region,
        &task.account.date,
        ctx.now,
    );
    let scratch = ScratchDir::new()?;
    let staged = scratch.write_csv(&file_name, &table)?;
    let key = format!("{}{}", tags_prefix(&task.resource_type, ctx.now), file_name);
    ctx.services
        .objects
        .upload_file(&config.bucket, &key, &staged.path)
        .await
        .with_context(|| format!("Failed to upload s3://{}/{}", config.bucket, key))?;
    scratch.close()?;

    ctx.log.info(format_args!(
        "Uploaded {} tagged resources to s3://{}/{}",
        resource_count, config.bucket, key
    ));
    Ok(Some(TagExport {
        file_name,
        file_size: staged.size,
        resource_count,
    }))
}
