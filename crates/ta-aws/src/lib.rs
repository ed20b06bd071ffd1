//! ta-aws - AWS collaborators for Trusted Advisor Explorer
//!
//! Handlers talk to AWS only through the traits in [`traits`]. The [`sdk`]
//! module implements them on the official AWS SDK; the `test-support`
//! feature adds in-memory fakes.

pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod fakes;
pub mod sdk;
pub mod traits;

pub use error::{AwsError, AwsResult};
pub use traits::{
    AccountDirectory, Crawler, MemberClients, ObjectStore, QueryEngine, QueryRequest,
    RegionDirectory, RoleAssumer, SessionCredentials, TableCatalog, TaggingApi, TrustedAdvisor,
    WorkflowStarter, ROLE_SESSION_NAME, SUPPORT_REGION,
};
