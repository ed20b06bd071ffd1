//! AWS SDK implementations of the collaborator traits.
//!
//! Conversions from SDK output into `ta-core` types live here so nothing
//! outside this module depends on SDK structs.

mod athena;
mod ec2;
mod glue;
mod organizations;
mod s3;
mod sfn;
mod sts;
mod support;
mod tagging;

pub use athena::AthenaQueryEngine;
pub use ec2::Ec2RegionDirectory;
pub use glue::GlueService;
pub use organizations::OrganizationsDirectory;
pub use s3::S3ObjectStore;
pub use sfn::StepFunctionsStarter;
pub use sts::StsRoleAssumer;
pub use support::{SdkMemberClients, SupportTrustedAdvisor};
pub use tagging::TaggingClient;

pub use aws_config::SdkConfig;

use crate::error::AwsError;
use crate::traits::{SessionCredentials, SUPPORT_REGION};
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_sts::error::{DisplayErrorContext, SdkError};

/// Load the shared SDK configuration from the Lambda environment.
pub async fn load_config() -> SdkConfig {
    let region_provider = RegionProviderChain::default_provider().or_else(SUPPORT_REGION);
    aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await
}

/// Static credentials for clients acting inside a member account.
pub(crate) fn member_credentials(session: &SessionCredentials) -> Credentials {
    Credentials::new(
        session.access_key_id.clone(),
        session.secret_access_key.clone(),
        Some(session.session_token.clone()),
        None,
        "ta-assumed-role",
    )
}

/// Normalise an SDK getter to `Option`. Whether a getter returns `T` or
/// `Option<T>` follows the member's nullability in the service model.
pub(crate) fn present<T>(value: impl Into<Option<T>>) -> Option<T> {
    value.into()
}

pub(crate) fn sdk_error<E, R>(operation: &str, err: SdkError<E, R>) -> AwsError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    AwsError::service(operation, DisplayErrorContext(&err).to_string())
}
