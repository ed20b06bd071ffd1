//! ta-lambda - Trusted Advisor Explorer pipeline handlers
//!
//! Every pipeline step runs as a handler over an explicit [`HandlerContext`]
//! holding its AWS collaborators, so the same code runs under the Lambda
//! runtime and against in-memory fakes.

pub mod context;
pub mod error;
pub mod handlers;
pub mod metrics;

pub use context::{HandlerContext, Services, SharedEnv};
pub use error::PipelineError;
pub use handlers::{dispatch, HandlerName};
