//! ta-core - Core library for Trusted Advisor Explorer
//!
//! This crate provides the records exchanged with the workflow engine,
//! handler configuration, PII masking, the refresh wait policy, storage
//! layout, and the CSV reshaping of check results and resource tags.

pub mod accounts;
pub mod check;
pub mod config;
pub mod error;
pub mod event;
pub mod fanout;
mod ids;
pub mod layout;
pub mod masking;
pub mod refresh;
pub mod report;
pub mod scratch;
pub mod tags;

pub use accounts::OrgAccount;
pub use check::{
    CheckDescription, CheckResult, CostOptimizingSummary, FlaggedResource, ResourcesSummary,
};
pub use config::{EnvSource, ProcessEnv};
pub use error::{CoreError, CoreResult};
pub use event::{
    AccountRecord, CheckRecord, CheckRefreshRequest, ExecutionReceipt, RefreshOutcome, RunStamp,
    TagTaskRecord, WaitOutcome,
};
pub use ids::{AccountId, CheckId};
pub use masking::{MaskedLog, Masker};
pub use refresh::{CheckRefreshStatus, RefreshPhase, RefreshStatus, WaitDecision};
pub use report::{CsvTable, ExtractOutcome, ExtractReport};
pub use scratch::{ScratchDir, StagedFile};
pub use tags::{TagCollector, TaggedResource};
