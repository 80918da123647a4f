//! External collaborator contracts and their AWS-backed implementations.
//!
//! Every collaborator is a trait so the API server can be constructed with
//! recording fakes in tests. The AWS implementations share one error policy:
//! remote failures are caught at this boundary, logged via `tracing`, and
//! reported only as a boolean (or `None`) -- they never propagate upward and
//! never abort the caller's primary mutation.

pub mod audit;
pub mod notify;
pub mod storage;

pub use audit::{AuditSink, CloudWatchAuditSink};
pub use notify::{AwsNotificationDispatcher, NotificationDispatcher};
pub use storage::{DocumentStore, S3DocumentStore};

/// Load the shared AWS SDK configuration, optionally pinning a region.
pub async fn load_sdk_config(region: Option<String>) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(aws_config::Region::new(region));
    }
    loader.load().await
}
