//! Trigger an asynchronous Trusted Advisor check refresh in a member account.

use anyhow::Result;
use ta_core::config::RefreshConfig;
use ta_core::{CheckRefreshRequest, RefreshOutcome};

use super::common::assume_member_role;
use crate::context::HandlerContext;

pub async fn handle(ctx: &HandlerContext, request: CheckRefreshRequest) -> Result<RefreshOutcome> {
    let config = RefreshConfig::load(ctx.env())?;
    let credentials =
        assume_member_role(ctx, &config.role_name, &config.bucket, &request.account_id).await?;

    let advisor = ctx.services.members.trusted_advisor(&credentials);
    let status = advisor.refresh_check(&request.check_id).await?;
    ctx.log.info(format_args!(
        "Refresh status of check {} is '{}'",
        request.check_id, status
    ));
    Ok(RefreshOutcome::new(&request, status))
}
