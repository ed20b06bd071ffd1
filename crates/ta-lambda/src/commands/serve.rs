//! Serve command implementation

use anyhow::Result;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use ta_core::ProcessEnv;
use ta_lambda::{Services, SharedEnv};

use super::invoke_once;
use crate::cli::GlobalArgs;

/// Execute the serve command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let name = global.require_handler()?;
    let sdk_config = ta_aws::sdk::load_config().await;
    let services = Services::from_sdk(&sdk_config);
    let env: SharedEnv = Arc::new(ProcessEnv);

    log::info!("Serving handler {:?}", name);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let services = services.clone();
        let env = env.clone();
        async move {
            invoke_once(name, services, env, event.payload)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime stopped: {}", e))
}
