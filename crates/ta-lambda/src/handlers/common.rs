//! Helpers shared by several handlers.

use anyhow::{Context, Result};
use serde::Serialize;
use ta_aws::{AwsError, SessionCredentials};
use ta_core::layout::assume_role_failure_key;
use ta_core::AccountId;

use crate::context::HandlerContext;

/// Status code reported for accepted workflow starts. The SDK does not
/// expose the HTTP status of successful calls, so it is fixed.
pub const STARTED_STATUS_CODE: u16 = 200;

/// Assume `role_name` in `account_id`.
///
/// When the member account denies the role, the raw error text is written to
/// `Logs/AssumeRoleFailure/<y>/<m>/<d>/<account>.log` in `bucket` before the
/// error is returned.
pub async fn assume_member_role(
    ctx: &HandlerContext,
    role_name: &str,
    bucket: &str,
    account_id: &AccountId,
) -> Result<SessionCredentials> {
    let role_arn = account_id.role_arn(role_name);
    ctx.log.info(format_args!("Assume role in child account {}", account_id));
    match ctx.services.roles.assume_role(account_id, &role_arn).await {
        Ok(credentials) => Ok(credentials),
        Err(err @ AwsError::AssumeRoleDenied { .. }) => {
            ctx.log
                .info(format_args!("Assume Role Error for Account: {}", account_id));
            record_assume_role_failure(ctx, bucket, account_id, &err).await;
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

async fn record_assume_role_failure(
    ctx: &HandlerContext,
    bucket: &str,
    account_id: &AccountId,
    err: &AwsError,
) {
    let key = assume_role_failure_key(account_id, ctx.now);
    let body = err.to_string().into_bytes();
    if let Err(write_err) = ctx.services.objects.put_object(bucket, &key, body).await {
        ctx.log.warn(format_args!(
            "Could not record assume role failure at {}: {}",
            key, write_err
        ));
    }
}

/// Start `state_machine_arn` with `input` serialized as JSON; returns the
/// execution ARN.
pub async fn start_workflow<T: Serialize + ?Sized>(
    ctx: &HandlerContext,
    state_machine_arn: &str,
    input: &T,
) -> Result<String> {
    let input = serde_json::to_string(input).context("Failed to serialize workflow input")?;
    ctx.log
        .info(format_args!("Executing State Machine: {}", state_machine_arn));
    let execution_arn = ctx
        .services
        .workflows
        .start_execution(state_machine_arn, &input)
        .await?;
    Ok(execution_arn)
}
