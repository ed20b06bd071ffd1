//! CLI command implementations

pub(crate) mod invoke;
pub(crate) mod render_views;
pub(crate) mod serve;

use anyhow::Result;
use chrono::Utc;
use serde_json::Value;
use ta_lambda::{dispatch, HandlerContext, HandlerName, Services, SharedEnv};

/// Build a fresh context and run one invocation.
pub(crate) async fn invoke_once(
    name: HandlerName,
    services: Services,
    env: SharedEnv,
    event: Value,
) -> Result<Value> {
    let ctx = HandlerContext::new(services, env, Utc::now())?;
    Ok(dispatch(name, &ctx, event).await?)
}
