//! Handler configuration read from the Lambda environment.
//!
//! Each handler owns a small validated struct. Loading collects every missing
//! required key before failing, so a misconfigured function reports the whole
//! list at once instead of one key per redeploy.

use crate::error::{CoreError, CoreResult};
use crate::ids::CheckId;
use log::LevelFilter;
use std::collections::HashMap;

/// Source of configuration values.
pub trait EnvSource {
    /// Look up a raw value by key.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Accumulates missing required keys while a config struct is assembled.
struct EnvReader<'a> {
    source: &'a dyn EnvSource,
    missing: Vec<String>,
}

impl<'a> EnvReader<'a> {
    fn new(source: &'a dyn EnvSource) -> Self {
        Self {
            source,
            missing: Vec::new(),
        }
    }

    /// Required non-blank value. Records the key as missing otherwise.
    fn required(&mut self, key: &str) -> String {
        match self.source.var(key) {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => {
                self.missing.push(key.to_string());
                String::new()
            }
        }
    }

    /// Required key whose value may legitimately be empty (e.g. `Tags`).
    fn required_list(&mut self, key: &str) -> Vec<String> {
        match self.source.var(key) {
            Some(v) => split_list(&v),
            None => {
                self.missing.push(key.to_string());
                Vec::new()
            }
        }
    }

    fn optional(&self, key: &str) -> Option<String> {
        self.source
            .var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn optional_list(&self, key: &str) -> Vec<String> {
        self.source
            .var(key)
            .map(|v| split_list(&v))
            .unwrap_or_default()
    }

    fn flag(&self, key: &str, truthy: &str) -> bool {
        self.source
            .var(key)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(truthy))
    }

    fn finish(self) -> CoreResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::MissingConfig { keys: self.missing })
        }
    }
}

/// Split a comma-separated setting, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Settings shared by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonConfig {
    /// `LOG_LEVEL`, defaults to `info`
    pub log_level: LevelFilter,
    /// `MASK_PII=true` masks account ids, names and emails in logs and errors
    pub mask_pii: bool,
}

impl CommonConfig {
    pub fn load(env: &dyn EnvSource) -> CoreResult<Self> {
        let reader = EnvReader::new(env);
        let log_level = match reader.optional("LOG_LEVEL") {
            Some(raw) => parse_log_level(&raw)?,
            None => LevelFilter::Info,
        };
        Ok(Self {
            log_level,
            mask_pii: reader.flag("MASK_PII", "true"),
        })
    }
}

/// Parse a log level name, accepting the Python-style `warning`/`critical` too.
pub fn parse_log_level(raw: &str) -> CoreResult<LevelFilter> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" | "critical" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        other => Err(CoreError::InvalidConfig {
            key: "LOG_LEVEL".to_string(),
            message: format!("unknown log level '{}'", other),
        }),
    }
}

/// Settings for the refresh and status-verification handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    /// `IAMRoleName` assumed in each member account
    pub role_name: String,
    /// `S3BucketName` receiving assume-role failure logs
    pub bucket: String,
}

impl RefreshConfig {
    pub fn load(env: &dyn EnvSource) -> CoreResult<Self> {
        let mut reader = EnvReader::new(env);
        let role_name = reader.required("IAMRoleName");
        let bucket = reader.required("S3BucketName");
        reader.finish()?;
        Ok(Self { role_name, bucket })
    }
}

/// Where the account list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSource {
    /// Page through AWS Organizations
    Organizations,
    /// A user-supplied CSV object (`FILE_OVERRIDE=true`)
    File { bucket: String, object: String },
}

/// Anonymous usage metric settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricConfig {
    pub uuid: String,
    pub region: String,
    pub version: String,
}

/// Settings for the account discovery handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountsConfig {
    pub source: AccountSource,
    /// `EXTRACT_TA_DATA_SFN_ARN`
    pub ta_state_machine_arn: String,
    /// `TAG_DATA_EXTRACT_SFN_ARN`, only required when tags are configured
    pub tag_state_machine_arn: Option<String>,
    /// `Tags`
    pub tags: Vec<String>,
    /// Present when `AnonymousUsage=yes`
    pub metric: Option<MetricConfig>,
}

impl AccountsConfig {
    pub fn load(env: &dyn EnvSource) -> CoreResult<Self> {
        let mut reader = EnvReader::new(env);
        let source = if reader.flag("FILE_OVERRIDE", "true") {
            AccountSource::File {
                bucket: reader.required("BUCKET_NAME"),
                object: reader.required("OBJECT_NAME"),
            }
        } else {
            AccountSource::Organizations
        };
        let ta_state_machine_arn = reader.required("EXTRACT_TA_DATA_SFN_ARN");
        let tags = reader.optional_list("Tags");
        let tag_state_machine_arn = if tags.is_empty() {
            None
        } else {
            Some(reader.required("TAG_DATA_EXTRACT_SFN_ARN"))
        };
        let metric = if reader.flag("AnonymousUsage", "yes") {
            Some(MetricConfig {
                uuid: reader.required("UUID"),
                region: reader.required("AWS_REGION"),
                version: reader.required("Version"),
            })
        } else {
            None
        };
        reader.finish()?;
        Ok(Self {
            source,
            ta_state_machine_arn,
            tag_state_machine_arn,
            tags,
            metric,
        })
    }
}

/// Settings for the check listing handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksConfig {
    /// `LANGUAGE`
    pub language: String,
    /// `Category`
    pub categories: Vec<String>,
    /// `EXTRACT_TA_DATA_PER_CHECK_SFN_ARN`
    pub state_machine_arn: String,
}

impl ChecksConfig {
    pub fn load(env: &dyn EnvSource) -> CoreResult<Self> {
        let mut reader = EnvReader::new(env);
        let language = reader.required("LANGUAGE");
        let categories = split_list(&reader.required("Category"));
        let state_machine_arn = reader.required("EXTRACT_TA_DATA_PER_CHECK_SFN_ARN");
        reader.finish()?;
        Ok(Self {
            language,
            categories,
            state_machine_arn,
        })
    }
}

/// Column header and positional schema for one check's details file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLayout {
    /// `Header_<checkId>`
    pub header: Vec<String>,
    /// `Schema_<checkId>`
    pub schema: Vec<String>,
}

/// Settings for the check result extraction handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub role_name: String,
    pub bucket: String,
    /// `Header_Summary`
    pub summary_header: Vec<String>,
    pub layout: CheckLayout,
}

impl ExtractConfig {
    /// `Ok(None)` when the check has no header/schema configured; nothing else
    /// is required in that case, so the handler can skip before touching AWS.
    pub fn load(env: &dyn EnvSource, check_id: &CheckId) -> CoreResult<Option<Self>> {
        let Some(layout) = Self::check_layout(env, check_id) else {
            return Ok(None);
        };
        let mut reader = EnvReader::new(env);
        let role_name = reader.required("IAMRoleName");
        let bucket = reader.required("S3BucketName");
        let summary_header = reader.required_list("Header_Summary");
        reader.finish()?;
        Ok(Some(Self {
            role_name,
            bucket,
            summary_header,
            layout,
        }))
    }

    /// Header and schema are kept verbatim (only the comma split) because
    /// header cells become CSV column names.
    fn check_layout(env: &dyn EnvSource, check_id: &CheckId) -> Option<CheckLayout> {
        let header = env.var(&format!("Header_{}", check_id))?;
        let schema = env.var(&format!("Schema_{}", check_id))?;
        Some(CheckLayout {
            header: header.split(',').map(String::from).collect(),
            schema: schema.split(',').map(|s| s.trim().to_string()).collect(),
        })
    }
}

/// Settings for the tag fan-out handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagsConfig {
    /// `ResourceTypes`
    pub resource_types: Vec<String>,
    /// `TAG_DATA_EXTRACT_SFN_ARN`
    pub state_machine_arn: String,
}

impl TagsConfig {
    pub fn load(env: &dyn EnvSource) -> CoreResult<Self> {
        let mut reader = EnvReader::new(env);
        let resource_types = split_list(&reader.required("ResourceTypes"));
        let state_machine_arn = reader.required("TAG_DATA_EXTRACT_SFN_ARN");
        reader.finish()?;
        Ok(Self {
            resource_types,
            state_machine_arn,
        })
    }
}

/// Settings for the tag extraction handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagExtractConfig {
    pub role_name: String,
    pub bucket: String,
    /// `CustomerKeys`; empty turns the handler into a no-op
    pub customer_keys: Vec<String>,
}

impl TagExtractConfig {
    pub fn load(env: &dyn EnvSource) -> CoreResult<Self> {
        let mut reader = EnvReader::new(env);
        let customer_keys = reader.optional_list("CustomerKeys");
        if customer_keys.is_empty() {
            return Ok(Self {
                role_name: reader.optional("IAMRoleName").unwrap_or_default(),
                bucket: reader.optional("S3BucketName").unwrap_or_default(),
                customer_keys,
            });
        }
        let role_name = reader.required("IAMRoleName");
        let bucket = reader.required("S3BucketName");
        reader.finish()?;
        Ok(Self {
            role_name,
            bucket,
            customer_keys,
        })
    }
}

/// Settings for the crawler handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerConfig {
    /// `CrawlerName`
    pub crawler_name: String,
}

impl CrawlerConfig {
    pub fn load(env: &dyn EnvSource) -> CoreResult<Self> {
        let mut reader = EnvReader::new(env);
        let crawler_name = reader.required("CrawlerName");
        reader.finish()?;
        Ok(Self { crawler_name })
    }
}

/// Settings for the Athena view handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewsConfig {
    /// `AthenaDb`
    pub database: String,
    /// `AthenaWorkGroup`
    pub work_group: String,
    /// `AthenaOutput`, bucket (and optional prefix) for query results
    pub output_bucket: String,
    /// `Tags`, may be empty
    pub tags: Vec<String>,
}

impl ViewsConfig {
    pub fn load(env: &dyn EnvSource) -> CoreResult<Self> {
        let mut reader = EnvReader::new(env);
        let database = reader.required("AthenaDb");
        let work_group = reader.required("AthenaWorkGroup");
        let output_bucket = reader.required("AthenaOutput");
        let tags = reader.required_list("Tags");
        reader.finish()?;
        Ok(Self {
            database,
            work_group,
            output_bucket,
            tags,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
