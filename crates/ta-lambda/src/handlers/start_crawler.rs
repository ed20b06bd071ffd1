//! Start the Glue crawler over the landed reports.

use anyhow::Result;
use serde::Serialize;
use ta_core::config::CrawlerConfig;

use crate::context::HandlerContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CrawlerStarted {
    pub crawler_name: String,
}

pub async fn handle(ctx: &HandlerContext) -> Result<CrawlerStarted> {
    let config = CrawlerConfig::load(ctx.env())?;
    ctx.services.crawler.start_crawler(&config.crawler_name).await?;
    ctx.log
        .info(format_args!("Started crawler {}", config.crawler_name));
    Ok(CrawlerStarted {
        crawler_name: config.crawler_name,
    })
}
