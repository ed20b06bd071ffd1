//! Invoke command implementation

use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use ta_core::ProcessEnv;
use ta_lambda::{Services, SharedEnv};

use super::invoke_once;
use crate::cli::{GlobalArgs, InvokeArgs};

/// Execute the invoke command
pub async fn execute(args: &InvokeArgs, global: &GlobalArgs) -> Result<()> {
    let name = global.require_handler()?;
    let event: Value = match &args.event {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read event file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Event file {} is not JSON", path.display()))?
        }
        None => Value::Object(Default::default()),
    };

    let sdk_config = ta_aws::sdk::load_config().await;
    let env: SharedEnv = Arc::new(ProcessEnv);
    let output = invoke_once(name, Services::from_sdk(&sdk_config), env, event).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
