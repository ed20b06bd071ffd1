//! Anonymous usage metric sent once per account discovery run.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use ta_core::config::MetricConfig;

/// Solutions Builder metrics endpoint.
pub const METRICS_ENDPOINT: &str = "https://metrics.awssolutionsbuilder.com/generic";

/// Solution identifier registered with the metrics endpoint.
pub const SOLUTION_ID: &str = "SO0082";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageData {
    pub solution_run_time: String,
    pub region: String,
    pub version: String,
}

/// Body posted to the metrics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageMetric {
    pub solution: String,
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub time_stamp: String,
    pub data: UsageData,
}

impl UsageMetric {
    pub fn new(config: &MetricConfig, at: DateTime<Utc>) -> Self {
        let now = at.format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        Self {
            solution: SOLUTION_ID.to_string(),
            uuid: config.uuid.clone(),
            time_stamp: now.clone(),
            data: UsageData {
                solution_run_time: now,
                region: config.region.clone(),
                version: config.version.clone(),
            },
        }
    }
}

/// Delivers usage metrics. Delivery failures are logged, never returned.
#[async_trait]
pub trait UsageReporter: Send + Sync {
    async fn report(&self, metric: &UsageMetric);
}

/// Posts metrics as JSON over HTTPS.
pub struct HttpUsageReporter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpUsageReporter {
    pub fn new() -> Self {
        Self::with_endpoint(METRICS_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

impl Default for HttpUsageReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageReporter for HttpUsageReporter {
    async fn report(&self, metric: &UsageMetric) {
        match serde_json::to_string(metric) {
            Ok(body) => log::info!("Metric Body: {}", body),
            Err(e) => log::warn!("Could not render metric body: {}", e),
        }
        match self.client.post(&self.endpoint).json(metric).send().await {
            Ok(response) => log::info!("Metric status code: {}", response.status()),
            Err(e) => log::error!("Error occurred while sending metric: {}", e),
        }
    }
}
