//! Poll a check's refresh status and decide how long the workflow waits.

use anyhow::Result;
use ta_core::config::RefreshConfig;
use ta_core::refresh::MAX_WAIT_SECONDS;
use ta_core::{CheckRefreshRequest, WaitDecision, WaitOutcome};

use super::common::assume_member_role;
use crate::context::HandlerContext;

pub async fn handle(ctx: &HandlerContext, request: CheckRefreshRequest) -> Result<WaitOutcome> {
    let config = RefreshConfig::load(ctx.env())?;
    let credentials =
        assume_member_role(ctx, &config.role_name, &config.bucket, &request.account_id).await?;

    let advisor = ctx.services.members.trusted_advisor(&credentials);
    let status = advisor.refresh_status(&request.check_id).await?;
    let decision = WaitDecision::from_status(&status);
    if decision.capped {
        ctx.log.warn(format_args!(
            "Skipping refresh wait for check {}: {} ms is more than {} seconds",
            request.check_id, status.millis_until_next_refreshable, MAX_WAIT_SECONDS
        ));
    } else {
        ctx.log.info(format_args!(
            "Check {} is '{}', refreshable in {} seconds",
            request.check_id, decision.status, decision.wait_time_in_seconds
        ));
    }
    Ok(WaitOutcome::new(
        &request,
        decision.status,
        decision.wait_time_in_seconds,
    ))
}
